//! Test utilities for Vitrex services.
//!
//! Provides `MockAuth` identity headers and payload fixtures.
//! Import in `#[cfg(test)]` blocks and integration tests only.

pub mod auth;
pub mod fixture;
