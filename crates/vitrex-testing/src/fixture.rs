//! Payload fixtures shared by service tests.

use serde_json::{Value, json};
use vitrex_domain::contact::{ContactDetails, Insurer};
use vitrex_domain::glass::{
    Choice, GlassDamage, OtherGlassDetails, RearWindowDetails, RearZone, WindshieldDamage,
    WindshieldDetails,
};
use vitrex_domain::payload::{IntakePayload, PartnerApplication};

pub fn contact() -> ContactDetails {
    ContactDetails {
        first_name: "Jeanne".into(),
        last_name: "Dupont".into(),
        email: "jeanne.dupont@example.fr".into(),
        phone: "06 12 34 56 78".into(),
        license_plate: "AB-123-CD".into(),
        insurer: Insurer::Maif,
        insurer_other: None,
        address: "12 rue des Lilas".into(),
        postal_code: "69003".into(),
        city: "Lyon".into(),
    }
}

/// Windshield intake with a single crack.
pub fn windshield_intake(referral_code: Option<&str>) -> IntakePayload {
    IntakePayload {
        contact: contact(),
        damage: GlassDamage::Windshield(WindshieldDetails {
            type_dommage: Choice(WindshieldDamage::SingleCrack),
        }),
        referral_code: referral_code.map(str::to_owned),
    }
}

pub fn rear_intake() -> IntakePayload {
    IntakePayload {
        contact: contact(),
        damage: GlassDamage::Rear(RearWindowDetails {
            zone_lunette: Choice(RearZone::Complete),
        }),
        referral_code: None,
    }
}

pub fn other_intake(description: &str) -> IntakePayload {
    IntakePayload {
        contact: contact(),
        damage: GlassDamage::Other(OtherGlassDetails {
            description: description.into(),
        }),
        referral_code: None,
    }
}

pub fn partner_application() -> PartnerApplication {
    PartnerApplication {
        first_name: "Karim".into(),
        last_name: "Benali".into(),
        email: "karim@garage-benali.fr".into(),
        phone: "04 78 00 00 00".into(),
        company: Some("Garage Benali".into()),
        message: "Je souhaite recommander vos services.".into(),
    }
}

/// Wire JSON for a windshield intake, as the browser posts it.
pub fn windshield_intake_json(referral_code: Option<&str>) -> Value {
    let mut body = json!({
        "firstName": "Jeanne",
        "lastName": "Dupont",
        "email": "jeanne.dupont@example.fr",
        "phone": "06 12 34 56 78",
        "licensePlate": "AB-123-CD",
        "insurer": "maif",
        "address": "12 rue des Lilas",
        "postalCode": "69003",
        "city": "Lyon",
        "glassType": "windshield",
        "glassTypeLabel": "Pare-brise",
        "details": { "typeDommage": { "type": "singleCrack", "label": "Une fissure" } },
    });
    if let Some(code) = referral_code {
        body["referralCode"] = json!(code);
    }
    body
}
