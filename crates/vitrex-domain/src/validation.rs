//! Field-level validation shared by every intake form.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}[\p{L}' -]*\p{L}$").expect("valid name regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+33\s?|0)[1-9](?:[\s.-]?\d{2}){4}$").expect("valid phone regex")
});

static PLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}-\d{3}-[A-Z]{2}$").expect("valid plate regex"));

static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("valid postal code regex"));

/// Minimum length of free-text fields (insurer name, city).
pub const MIN_TEXT_LEN: usize = 2;

/// Minimum length of a street address.
pub const MIN_ADDRESS_LEN: usize = 5;

pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value.trim())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value.trim())
}

/// French registration plate in `AA-999-AA` form.
pub fn is_valid_plate(value: &str) -> bool {
    PLATE_RE.is_match(value)
}

pub fn is_valid_postal_code(value: &str) -> bool {
    POSTAL_CODE_RE.is_match(value.trim())
}

pub fn has_min_len(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Reformat raw plate input as the user types: keep ASCII alphanumerics,
/// uppercase them, cap at 7 characters and insert hyphens after the 2nd and
/// 5th characters.
///
/// ```
/// use vitrex_domain::validation::format_plate;
/// assert_eq!(format_plate("ab123cd"), "AB-123-CD");
/// assert_eq!(format_plate("ab1"), "AB-1");
/// ```
pub fn format_plate(input: &str) -> String {
    let mut out = String::with_capacity(9);
    for (i, c) in input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(7)
        .enumerate()
    {
        if i == 2 || i == 5 {
            out.push('-');
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}

/// Per-field error messages keyed by the field's wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    /// Record `message` for `field` unless `ok` holds.
    pub fn check(&mut self, field: &'static str, ok: bool, message: &'static str) {
        if !ok {
            self.insert(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    /// Keep only the errors whose field satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|field, _| keep(field));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields: self })
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.keys().copied().collect();
        f.write_str(&names.join(", "))
    }
}

/// A form failed validation; carries one message per offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fields: {fields}")]
pub struct ValidationError {
    pub fields: FieldErrors,
}
