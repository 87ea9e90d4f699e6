pub mod agent;
pub mod intake;
pub mod partner;
pub mod referral;
pub mod submission;
pub mod user;
