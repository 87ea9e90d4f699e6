//! Referral codes and the attribution context carried from landing to submission.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Every referral code starts with this prefix.
pub const REFERRAL_CODE_PREFIX: &str = "AG-";

/// Number of random characters after the prefix.
pub const REFERRAL_SUFFIX_LEN: usize = 5;

/// Alphabet the random suffix is drawn from (uppercase alphanumeric).
pub const REFERRAL_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

static REFERRAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^AG-[A-Z0-9]{5}$").expect("valid referral code regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed referral code: {0:?}")]
pub struct ReferralCodeError(pub String);

/// A well-formed agent referral code (`AG-XXXXX`).
///
/// Parsing trims surrounding whitespace and uppercases, so `" ag-7k2qd "`
/// parses to `AG-7K2QD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferralCode(String);

impl ReferralCode {
    /// Build a code from a random suffix.
    pub fn from_suffix(suffix: &str) -> Result<Self, ReferralCodeError> {
        format!("{REFERRAL_CODE_PREFIX}{suffix}").parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for ReferralCode {
    type Err = ReferralCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        if REFERRAL_CODE_RE.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(ReferralCodeError(s.to_owned()))
        }
    }
}

impl TryFrom<String> for ReferralCode {
    type Error = ReferralCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReferralCode> for String {
    fn from(code: ReferralCode) -> Self {
        code.0
    }
}

impl fmt::Display for ReferralCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the current attribution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributionSource {
    /// Freshly captured from the landing URL; must be written to storage.
    Query,
    /// Reused from durable client storage.
    Stored,
    /// Sent explicitly with the submitted payload.
    Payload,
    None,
}

/// Referral attribution for one visitor, passed explicitly from page load to
/// submission instead of being read ad hoc from storage.
///
/// Holds the opaque code string exactly as received (trimmed). Resolution
/// against the agent table happens server-side at persistence time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionContext {
    code: Option<String>,
    source: AttributionSource,
}

impl Default for AttributionContext {
    fn default() -> Self {
        Self::none()
    }
}

impl AttributionContext {
    pub fn none() -> Self {
        Self {
            code: None,
            source: AttributionSource::None,
        }
    }

    /// Capture attribution on page load.
    ///
    /// A code in the query parameter wins and replaces whatever was stored;
    /// otherwise the stored code is reused. Blank values count as absent.
    pub fn capture(query_code: Option<&str>, stored_code: Option<&str>) -> Self {
        let non_blank = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        if let Some(code) = non_blank(query_code) {
            return Self {
                code: Some(code),
                source: AttributionSource::Query,
            };
        }
        if let Some(code) = non_blank(stored_code) {
            return Self {
                code: Some(code),
                source: AttributionSource::Stored,
            };
        }
        Self::none()
    }

    pub fn raw_code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn source(&self) -> AttributionSource {
        self.source
    }

    /// `true` when storage must be updated with the captured code.
    pub fn should_persist(&self) -> bool {
        self.source == AttributionSource::Query
    }

    /// Attach this attribution to a payload that may already carry its own code.
    /// An explicit payload code takes precedence.
    pub fn or_payload(self, payload_code: Option<&str>) -> Self {
        match payload_code.map(str::trim).filter(|s| !s.is_empty()) {
            Some(code) => Self {
                code: Some(code.to_owned()),
                source: AttributionSource::Payload,
            },
            None => self,
        }
    }
}
