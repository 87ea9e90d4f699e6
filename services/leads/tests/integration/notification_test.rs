use vitrex_domain::payload::FormPayload;
use vitrex_leads::domain::types::DeliveryOutcome;
use vitrex_testing::fixture::{partner_application, windshield_intake};

use crate::helpers::{CONTACT_PHONE, MockMailTransport, OPERATOR, SENDER, dispatcher};

#[tokio::test]
async fn should_deliver_from_sender_with_submitter_as_reply_to() {
    let transport = MockMailTransport::working();
    let sent = transport.sent_handle();
    let uc = dispatcher(transport, OPERATOR);

    let outcome = uc
        .execute(&FormPayload::CarDamage(windshield_intake(None)), None)
        .await;

    assert_eq!(outcome, DeliveryOutcome::Delivered);
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let mail = &sent[0];
    assert_eq!(mail.from, SENDER);
    assert_eq!(mail.from_name, "Jeanne Dupont");
    assert_eq!(mail.reply_to, "jeanne.dupont@example.fr");
    assert_eq!(mail.to, OPERATOR);
    assert_eq!(mail.subject, "Nouvelle demande - Pare-brise - Jeanne Dupont");
    assert!(mail.text.contains("Immatriculation : AB-123-CD"));
    assert!(!mail.text.contains("Code parrain"));
}

#[tokio::test]
async fn should_mention_referral_code_in_body() {
    let transport = MockMailTransport::working();
    let sent = transport.sent_handle();
    let uc = dispatcher(transport, OPERATOR);

    uc.execute(
        &FormPayload::CarDamage(windshield_intake(Some("AG-7K2QD"))),
        Some("AG-7K2QD"),
    )
    .await;

    assert!(sent.lock().unwrap()[0].text.contains("Code parrain : AG-7K2QD"));
}

#[tokio::test]
async fn should_fall_back_to_mailto_when_transport_fails() {
    let uc = dispatcher(MockMailTransport::failing(), OPERATOR);

    let outcome = uc
        .execute(&FormPayload::Partner(partner_application()), None)
        .await;

    let DeliveryOutcome::Fallback { mailto } = outcome else {
        panic!("expected Fallback, got {outcome:?}");
    };
    assert!(mailto.starts_with(
        "mailto:ops@vitrex.fr?subject=Nouvelle%20candidature%20partenaire%20-%20Karim%20Benali&body="
    ));
    assert!(mailto.contains("karim%40garage-benali.fr"));
    assert!(!mailto.contains(' '));
}

#[tokio::test]
async fn should_offer_phone_when_no_fallback_is_possible() {
    let uc = dispatcher(MockMailTransport::failing(), "not an address");

    let outcome = uc
        .execute(&FormPayload::CarDamage(windshield_intake(None)), None)
        .await;

    assert_eq!(
        outcome,
        DeliveryOutcome::Unavailable {
            contact_phone: CONTACT_PHONE.to_owned()
        }
    );
}
