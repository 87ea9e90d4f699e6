//! Normalized payloads handed to the recorder and the notification dispatcher.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::contact::ContactDetails;
use crate::glass::{GlassDamage, GlassType, Labelled};
use crate::validation::{
    FieldErrors, MIN_TEXT_LEN, ValidationError, has_min_len, is_valid_email, is_valid_name,
    is_valid_phone,
};

/// Kind of form a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormType {
    CarDamage,
    Partner,
}

impl FormType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CarDamage => "carDamage",
            Self::Partner => "partner",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "carDamage" => Ok(Self::CarDamage),
            "partner" => Ok(Self::Partner),
            _ => Err(()),
        }
    }
}

/// Completed car-damage intake.
///
/// Wire shape: contact fields at the top level, then `glassType`,
/// `glassTypeLabel`, the branch-specific `details` object and the optional
/// `referralCode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IntakePayloadWire", into = "IntakePayloadWire")]
pub struct IntakePayload {
    pub contact: ContactDetails,
    pub damage: GlassDamage,
    /// Opaque referral code as captured on the client, never resolved here.
    pub referral_code: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntakePayloadWire {
    #[serde(flatten)]
    contact: ContactDetails,
    glass_type: GlassType,
    #[serde(default)]
    glass_type_label: Option<String>,
    details: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    referral_code: Option<String>,
}

impl TryFrom<IntakePayloadWire> for IntakePayload {
    type Error = serde_json::Error;

    fn try_from(wire: IntakePayloadWire) -> Result<Self, Self::Error> {
        Ok(Self {
            contact: wire.contact,
            damage: GlassDamage::from_details(wire.glass_type, wire.details)?,
            referral_code: wire.referral_code,
        })
    }
}

impl From<IntakePayload> for IntakePayloadWire {
    fn from(payload: IntakePayload) -> Self {
        let glass_type = payload.damage.glass_type();
        Self {
            contact: payload.contact,
            glass_type,
            glass_type_label: Some(glass_type.label().to_owned()),
            details: payload.damage.details_json(),
            referral_code: payload.referral_code,
        }
    }
}

impl IntakePayload {
    pub fn glass_type(&self) -> GlassType {
        self.damage.glass_type()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        if let Err(e) = self.contact.validate() {
            errors.merge(e.fields);
        }
        if let Err(e) = self.damage.validate() {
            errors.merge(e.fields);
        }
        errors.into_result()
    }
}

/// Application from a prospective referral partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub message: String,
}

impl PartnerApplication {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.check("firstName", is_valid_name(&self.first_name), "Prénom invalide");
        errors.check("lastName", is_valid_name(&self.last_name), "Nom invalide");
        errors.check("email", is_valid_email(&self.email), "Adresse e-mail invalide");
        errors.check(
            "phone",
            is_valid_phone(&self.phone),
            "Numéro de téléphone invalide",
        );
        errors.check(
            "message",
            has_min_len(&self.message, MIN_TEXT_LEN),
            "Présentez-vous en quelques mots",
        );
        errors.into_result()
    }
}

/// Any form payload the service records and forwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPayload {
    CarDamage(IntakePayload),
    Partner(PartnerApplication),
}

impl FormPayload {
    pub fn form_type(&self) -> FormType {
        match self {
            Self::CarDamage(_) => FormType::CarDamage,
            Self::Partner(_) => FormType::Partner,
        }
    }

    /// Serialized form data as stored on the submission.
    pub fn form_data(&self) -> serde_json::Value {
        let value = match self {
            Self::CarDamage(p) => serde_json::to_value(p),
            Self::Partner(p) => serde_json::to_value(p),
        };
        value.unwrap_or(serde_json::Value::Null)
    }

    /// Submitter's own address, used as reply-to on notifications.
    pub fn submitter_email(&self) -> &str {
        match self {
            Self::CarDamage(p) => p.contact.email.trim(),
            Self::Partner(p) => p.email.trim(),
        }
    }

    pub fn submitter_name(&self) -> String {
        match self {
            Self::CarDamage(p) => p.contact.full_name(),
            Self::Partner(p) => p.full_name(),
        }
    }

    pub fn referral_code(&self) -> Option<&str> {
        match self {
            Self::CarDamage(p) => p.referral_code.as_deref(),
            Self::Partner(_) => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::CarDamage(p) => p.validate(),
            Self::Partner(p) => p.validate(),
        }
    }
}
