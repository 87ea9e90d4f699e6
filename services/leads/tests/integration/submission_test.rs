use vitrex_domain::pagination::PageRequest;
use vitrex_domain::payload::{FormPayload, FormType};
use vitrex_leads::domain::types::{AgentLinkage, SubmissionFilter};
use vitrex_leads::error::LeadsServiceError;
use vitrex_leads::usecase::submission::{
    DeleteSubmissionUseCase, GetSubmissionUseCase, ListSubmissionsUseCase, RecordSubmissionInput,
};
use vitrex_testing::fixture::{partner_application, windshield_intake};

use crate::helpers::{MockAgentRepo, MockSubmissionRepo, recorder, test_agent};

fn intake(code: Option<&str>) -> RecordSubmissionInput {
    RecordSubmissionInput {
        payload: FormPayload::CarDamage(windshield_intake(code)),
        user_id: None,
        referral_code: code.map(str::to_owned),
    }
}

#[tokio::test]
async fn should_link_submission_to_active_agent() {
    let agent = test_agent("AG-7K2QD", true);
    let submissions = MockSubmissionRepo::empty();
    let stored = submissions.submissions_handle();
    let uc = recorder(MockAgentRepo::new(vec![agent.clone()]), submissions);

    let recorded = uc.execute(intake(Some("AG-7K2QD"))).await.unwrap();

    assert_eq!(recorded.linkage, AgentLinkage::Linked(agent.id));
    let stored = stored.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, recorded.id);
    assert_eq!(stored[0].agent_id, Some(agent.id));
    assert_eq!(stored[0].referral_code.as_deref(), Some("AG-7K2QD"));
    assert_eq!(stored[0].form_type, FormType::CarDamage);
    assert_eq!(stored[0].form_data["referralCode"], "AG-7K2QD");
}

#[tokio::test]
async fn should_keep_unknown_code_without_agent() {
    let submissions = MockSubmissionRepo::empty();
    let stored = submissions.submissions_handle();
    let uc = recorder(MockAgentRepo::empty(), submissions);

    let recorded = uc.execute(intake(Some("AG-UNKN0"))).await.unwrap();

    assert_eq!(recorded.linkage, AgentLinkage::UnlinkedKnownCode);
    let stored = stored.lock().unwrap();
    assert_eq!(stored[0].agent_id, None);
    assert_eq!(stored[0].referral_code.as_deref(), Some("AG-UNKN0"));
}

#[tokio::test]
async fn should_not_link_code_differing_only_in_case() {
    let submissions = MockSubmissionRepo::empty();
    let stored = submissions.submissions_handle();
    let uc = recorder(
        MockAgentRepo::new(vec![test_agent("AG-7K2QD", true)]),
        submissions,
    );

    let recorded = uc.execute(intake(Some("ag-7k2qd"))).await.unwrap();

    assert_eq!(recorded.linkage, AgentLinkage::UnlinkedKnownCode);
    let stored = stored.lock().unwrap();
    assert_eq!(stored[0].agent_id, None);
    assert_eq!(stored[0].referral_code.as_deref(), Some("ag-7k2qd"));
}

#[tokio::test]
async fn should_store_trimmed_code_matching_linked_agent() {
    let agent = test_agent("AG-7K2QD", true);
    let submissions = MockSubmissionRepo::empty();
    let stored = submissions.submissions_handle();
    let uc = recorder(MockAgentRepo::new(vec![agent.clone()]), submissions);

    uc.execute(RecordSubmissionInput {
        payload: FormPayload::CarDamage(windshield_intake(None)),
        user_id: None,
        referral_code: Some(" AG-7K2QD ".to_owned()),
    })
    .await
    .unwrap();

    let stored = stored.lock().unwrap();
    assert_eq!(stored[0].agent_id, Some(agent.id));
    assert_eq!(
        stored[0].referral_code.as_deref(),
        Some(agent.referral_code.as_str())
    );
}

#[tokio::test]
async fn should_not_link_inactive_agent() {
    let uc = recorder(
        MockAgentRepo::new(vec![test_agent("AG-7K2QD", false)]),
        MockSubmissionRepo::empty(),
    );

    let recorded = uc.execute(intake(Some("AG-7K2QD"))).await.unwrap();

    assert_eq!(recorded.linkage, AgentLinkage::UnlinkedKnownCode);
}

#[tokio::test]
async fn should_record_without_code() {
    let submissions = MockSubmissionRepo::empty();
    let stored = submissions.submissions_handle();
    let uc = recorder(MockAgentRepo::empty(), submissions);

    let recorded = uc
        .execute(RecordSubmissionInput {
            payload: FormPayload::Partner(partner_application()),
            user_id: None,
            referral_code: Some("  ".to_owned()),
        })
        .await
        .unwrap();

    assert_eq!(recorded.linkage, AgentLinkage::NoCode);
    let stored = stored.lock().unwrap();
    assert_eq!(stored[0].form_type, FormType::Partner);
    assert_eq!(stored[0].referral_code, None);
    assert_eq!(stored[0].form_data["email"], "karim@garage-benali.fr");
}

#[tokio::test]
async fn should_surface_storage_failure() {
    let uc = recorder(MockAgentRepo::empty(), MockSubmissionRepo::failing());

    let result = uc.execute(intake(None)).await;

    assert!(
        matches!(result, Err(LeadsServiceError::Internal(_))),
        "expected Internal, got {result:?}"
    );
}

#[tokio::test]
async fn should_filter_listing_by_form_type_and_agent() {
    let agent = test_agent("AG-7K2QD", true);
    let submissions = MockSubmissionRepo::empty();
    let uc = recorder(MockAgentRepo::new(vec![agent.clone()]), submissions.clone());
    uc.execute(intake(Some("AG-7K2QD"))).await.unwrap();
    uc.execute(intake(None)).await.unwrap();
    uc.execute(RecordSubmissionInput {
        payload: FormPayload::Partner(partner_application()),
        user_id: None,
        referral_code: None,
    })
    .await
    .unwrap();

    let list = ListSubmissionsUseCase { submissions };

    let all = list
        .execute(SubmissionFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.total, 3);

    let car = list
        .execute(
            SubmissionFilter {
                form_type: Some(FormType::CarDamage),
                agent_id: None,
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(car.total, 2);

    let by_agent = list
        .execute(
            SubmissionFilter {
                form_type: None,
                agent_id: Some(agent.id),
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_agent.total, 1);
    assert_eq!(by_agent.items[0].agent_id, Some(agent.id));
}

#[tokio::test]
async fn should_get_and_delete_submission() {
    let submissions = MockSubmissionRepo::empty();
    let recorded = recorder(MockAgentRepo::empty(), submissions.clone())
        .execute(intake(None))
        .await
        .unwrap();

    let get = GetSubmissionUseCase {
        submissions: submissions.clone(),
    };
    assert_eq!(get.execute(recorded.id).await.unwrap().id, recorded.id);

    let delete = DeleteSubmissionUseCase {
        submissions: submissions.clone(),
    };
    delete.execute(recorded.id).await.unwrap();

    let again = delete.execute(recorded.id).await;
    assert!(
        matches!(again, Err(LeadsServiceError::SubmissionNotFound)),
        "expected SubmissionNotFound, got {again:?}"
    );
    let missing = get.execute(recorded.id).await;
    assert!(matches!(missing, Err(LeadsServiceError::SubmissionNotFound)));
}
