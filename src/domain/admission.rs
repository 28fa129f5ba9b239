pub mod availability;
pub mod client;
pub mod rate_limiter;
