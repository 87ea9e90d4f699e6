//! Domain types shared across Vitrex services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod contact;
pub mod glass;
pub mod id;
pub mod intake;
pub mod pagination;
pub mod payload;
pub mod referral;
pub mod role;
pub mod validation;
