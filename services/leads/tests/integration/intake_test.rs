use vitrex_domain::id::UserId;
use vitrex_domain::payload::FormPayload;
use vitrex_domain::referral::AttributionContext;
use vitrex_leads::domain::types::DeliveryOutcome;
use vitrex_leads::error::LeadsServiceError;
use vitrex_leads::usecase::intake::{SubmitFormInput, SubmitFormUseCase};
use vitrex_testing::fixture::{other_intake, windshield_intake};

use crate::helpers::{
    MockAgentRepo, MockMailTransport, MockSubmissionRepo, OPERATOR, dispatcher, recorder,
    test_agent,
};

fn submit_form(
    agents: MockAgentRepo,
    submissions: MockSubmissionRepo,
    transport: MockMailTransport,
) -> SubmitFormUseCase<MockAgentRepo, MockSubmissionRepo, MockMailTransport> {
    SubmitFormUseCase {
        recorder: recorder(agents, submissions),
        dispatcher: dispatcher(transport, OPERATOR),
    }
}

#[tokio::test]
async fn should_record_and_notify() {
    let submissions = MockSubmissionRepo::empty();
    let stored = submissions.submissions_handle();
    let transport = MockMailTransport::working();
    let sent = transport.sent_handle();
    let uc = submit_form(MockAgentRepo::empty(), submissions, transport);
    let user_id = UserId::generate();

    let output = uc
        .execute(SubmitFormInput {
            payload: FormPayload::CarDamage(windshield_intake(None)),
            user_id: Some(user_id),
            attribution: AttributionContext::none(),
        })
        .await
        .unwrap();

    assert_eq!(output.outcome, DeliveryOutcome::Delivered);
    let stored = stored.lock().unwrap();
    assert_eq!(output.submission_id, Some(stored[0].id));
    assert_eq!(stored[0].user_id, Some(user_id));
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_notify_even_when_recording_fails() {
    let transport = MockMailTransport::working();
    let sent = transport.sent_handle();
    let uc = submit_form(
        MockAgentRepo::empty(),
        MockSubmissionRepo::failing(),
        transport,
    );

    let output = uc
        .execute(SubmitFormInput {
            payload: FormPayload::CarDamage(windshield_intake(None)),
            user_id: None,
            attribution: AttributionContext::none(),
        })
        .await
        .unwrap();

    assert_eq!(output.submission_id, None);
    assert_eq!(output.outcome, DeliveryOutcome::Delivered);
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_keep_record_when_notification_fails() {
    let submissions = MockSubmissionRepo::empty();
    let stored = submissions.submissions_handle();
    let uc = submit_form(
        MockAgentRepo::empty(),
        submissions,
        MockMailTransport::failing(),
    );

    let output = uc
        .execute(SubmitFormInput {
            payload: FormPayload::CarDamage(other_intake("Toit panoramique fendu")),
            user_id: None,
            attribution: AttributionContext::none(),
        })
        .await
        .unwrap();

    assert!(matches!(output.outcome, DeliveryOutcome::Fallback { .. }));
    assert!(output.submission_id.is_some());
    assert_eq!(stored.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_invalid_payload_without_side_effects() {
    let submissions = MockSubmissionRepo::empty();
    let stored = submissions.submissions_handle();
    let transport = MockMailTransport::working();
    let sent = transport.sent_handle();
    let uc = submit_form(MockAgentRepo::empty(), submissions, transport);

    let mut payload = windshield_intake(None);
    payload.contact.email = "jeanne".to_owned();
    let result = uc
        .execute(SubmitFormInput {
            payload: FormPayload::CarDamage(payload),
            user_id: None,
            attribution: AttributionContext::none(),
        })
        .await;

    match result {
        Err(LeadsServiceError::InvalidPayload(e)) => assert!(e.fields.contains("email")),
        other => panic!("expected InvalidPayload, got {other:?}"),
    }
    assert!(stored.lock().unwrap().is_empty());
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_attribute_stored_code_when_payload_has_none() {
    let agent = test_agent("AG-C00K1", true);
    let submissions = MockSubmissionRepo::empty();
    let stored = submissions.submissions_handle();
    let transport = MockMailTransport::working();
    let sent = transport.sent_handle();
    let uc = submit_form(MockAgentRepo::new(vec![agent.clone()]), submissions, transport);

    uc.execute(SubmitFormInput {
        payload: FormPayload::CarDamage(windshield_intake(None)),
        user_id: None,
        attribution: AttributionContext::capture(None, Some("AG-C00K1")),
    })
    .await
    .unwrap();

    let stored = stored.lock().unwrap();
    assert_eq!(stored[0].agent_id, Some(agent.id));
    assert_eq!(stored[0].referral_code.as_deref(), Some("AG-C00K1"));
    assert_eq!(stored[0].form_data["referralCode"], "AG-C00K1");
    assert!(sent.lock().unwrap()[0].text.contains("Code parrain : AG-C00K1"));
}

#[tokio::test]
async fn should_prefer_payload_code_over_stored_code() {
    let cookie_agent = test_agent("AG-C00K1", true);
    let payload_agent = test_agent("AG-PAYL1", true);
    let submissions = MockSubmissionRepo::empty();
    let stored = submissions.submissions_handle();
    let uc = submit_form(
        MockAgentRepo::new(vec![cookie_agent, payload_agent.clone()]),
        submissions,
        MockMailTransport::working(),
    );

    uc.execute(SubmitFormInput {
        payload: FormPayload::CarDamage(windshield_intake(Some("AG-PAYL1"))),
        user_id: None,
        attribution: AttributionContext::capture(None, Some("AG-C00K1")),
    })
    .await
    .unwrap();

    let stored = stored.lock().unwrap();
    assert_eq!(stored[0].agent_id, Some(payload_agent.id));
    assert_eq!(stored[0].referral_code.as_deref(), Some("AG-PAYL1"));
}
