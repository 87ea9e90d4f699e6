//! Identity and vehicle details collected on the first intake step.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::{
    FieldErrors, MIN_ADDRESS_LEN, MIN_TEXT_LEN, ValidationError, has_min_len, is_valid_email,
    is_valid_name, is_valid_phone, is_valid_plate, is_valid_postal_code,
};

/// Insurer catalogue offered in the insurer select.
///
/// `Other` unlocks a free-text insurer name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Insurer {
    Axa,
    Allianz,
    Maaf,
    Macif,
    Maif,
    Groupama,
    Gmf,
    Matmut,
    Generali,
    Mma,
    DirectAssurance,
    Other,
}

impl Insurer {
    pub const ALL: [Insurer; 12] = [
        Self::Axa,
        Self::Allianz,
        Self::Maaf,
        Self::Macif,
        Self::Maif,
        Self::Groupama,
        Self::Gmf,
        Self::Matmut,
        Self::Generali,
        Self::Mma,
        Self::DirectAssurance,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Axa => "axa",
            Self::Allianz => "allianz",
            Self::Maaf => "maaf",
            Self::Macif => "macif",
            Self::Maif => "maif",
            Self::Groupama => "groupama",
            Self::Gmf => "gmf",
            Self::Matmut => "matmut",
            Self::Generali => "generali",
            Self::Mma => "mma",
            Self::DirectAssurance => "directAssurance",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Axa => "AXA",
            Self::Allianz => "Allianz",
            Self::Maaf => "MAAF",
            Self::Macif => "MACIF",
            Self::Maif => "MAIF",
            Self::Groupama => "Groupama",
            Self::Gmf => "GMF",
            Self::Matmut => "Matmut",
            Self::Generali => "Generali",
            Self::Mma => "MMA",
            Self::DirectAssurance => "Direct Assurance",
            Self::Other => "Autre",
        }
    }
}

impl FromStr for Insurer {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|insurer| insurer.as_str() == s)
            .ok_or(())
    }
}

/// Fields of the identity & vehicle step, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
    LicensePlate,
    Insurer,
    InsurerOther,
    Address,
    PostalCode,
    City,
}

impl ContactField {
    pub const ALL: [ContactField; 10] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::LicensePlate,
        Self::Insurer,
        Self::InsurerOther,
        Self::Address,
        Self::PostalCode,
        Self::City,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::LicensePlate => "licensePlate",
            Self::Insurer => "insurer",
            Self::InsurerOther => "insurerOther",
            Self::Address => "address",
            Self::PostalCode => "postalCode",
            Self::City => "city",
        }
    }
}

/// Validated identity & vehicle block of a car-damage intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub license_plate: String,
    pub insurer: Insurer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurer_other: Option<String>,
    pub address: String,
    pub postal_code: String,
    pub city: String,
}

impl ContactDetails {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Human-readable insurer, using the free-text name for `Other`.
    pub fn insurer_label(&self) -> &str {
        match (self.insurer, self.insurer_other.as_deref()) {
            (Insurer::Other, Some(name)) if !name.trim().is_empty() => name.trim(),
            (insurer, _) => insurer.label(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_contact_fields(ContactInput {
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            phone: &self.phone,
            license_plate: &self.license_plate,
            insurer: Some(self.insurer),
            insurer_other: self.insurer_other.as_deref().unwrap_or_default(),
            address: &self.address,
            postal_code: &self.postal_code,
            city: &self.city,
        })
        .into_result()
    }
}

/// Borrowed view over contact fields, possibly incomplete (insurer unset).
pub struct ContactInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub license_plate: &'a str,
    pub insurer: Option<Insurer>,
    pub insurer_other: &'a str,
    pub address: &'a str,
    pub postal_code: &'a str,
    pub city: &'a str,
}

/// Validate every contact field; an empty result means the step may advance.
pub fn validate_contact_fields(input: ContactInput<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check(
        ContactField::FirstName.as_str(),
        is_valid_name(input.first_name),
        "Prénom invalide",
    );
    errors.check(
        ContactField::LastName.as_str(),
        is_valid_name(input.last_name),
        "Nom invalide",
    );
    errors.check(
        ContactField::Email.as_str(),
        is_valid_email(input.email),
        "Adresse e-mail invalide",
    );
    errors.check(
        ContactField::Phone.as_str(),
        is_valid_phone(input.phone),
        "Numéro de téléphone invalide",
    );
    errors.check(
        ContactField::LicensePlate.as_str(),
        is_valid_plate(input.license_plate),
        "Format attendu : AA-999-AA",
    );
    errors.check(
        ContactField::Insurer.as_str(),
        input.insurer.is_some(),
        "Choisissez votre assureur",
    );
    if input.insurer == Some(Insurer::Other) {
        errors.check(
            ContactField::InsurerOther.as_str(),
            has_min_len(input.insurer_other, MIN_TEXT_LEN),
            "Précisez le nom de votre assureur",
        );
    }
    errors.check(
        ContactField::Address.as_str(),
        has_min_len(input.address, MIN_ADDRESS_LEN),
        "Adresse invalide",
    );
    errors.check(
        ContactField::PostalCode.as_str(),
        is_valid_postal_code(input.postal_code),
        "Code postal à 5 chiffres",
    );
    errors.check(
        ContactField::City.as_str(),
        has_min_len(input.city, MIN_TEXT_LEN),
        "Ville invalide",
    );
    errors
}
