//! Service plumbing shared by Vitrex services: error responses, health
//! probes, request ids, timestamp formatting and tracing setup.

pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
