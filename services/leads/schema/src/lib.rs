//! sea-orm entities for the leads service.

pub mod agents;
pub mod form_submissions;
pub mod users;
