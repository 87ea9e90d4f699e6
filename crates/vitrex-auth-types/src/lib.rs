//! Auth types shared across Vitrex services.
//!
//! Provides the gateway-injected `Identity` extractor, the admin
//! authorization policy, and the referral attribution cookie.

pub mod cookie;
pub mod identity;
pub mod policy;
