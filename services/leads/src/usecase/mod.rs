pub mod agent;
pub mod intake;
pub mod notification;
pub mod referral;
pub mod referral_code;
pub mod submission;
pub mod user;
