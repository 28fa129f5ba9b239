pub mod email;
pub mod message;
pub mod submission;
pub mod verification;
