//! Account roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named role claim carried by an authenticated identity.
///
/// Wire format: kebab-case string (`customer`, `admin`, `main-admin`).
/// Exactly one account holds `MainAdmin`; it is derived from configuration,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Customer,
    Admin,
    MainAdmin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::MainAdmin => "main-admin",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Customer => 0,
            Self::Admin => 1,
            Self::MainAdmin => 2,
        }
    }

    pub fn is_admin(self) -> bool {
        self >= Self::Admin
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            "main-admin" => Ok(Self::MainAdmin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}
