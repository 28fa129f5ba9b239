mod hunter;
mod null;

pub use hunter::HunterClient;
pub use null::NullVerifier;
