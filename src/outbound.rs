pub mod notifier;
pub mod telemetry;
pub mod verifier;
