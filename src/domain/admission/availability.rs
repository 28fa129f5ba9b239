use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide switch that stops the relay from accepting submissions.
///
/// Suspension is one-way: once tripped it holds until the process restarts.
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct ServiceAvailability {
    suspended: Arc<AtomicBool>,
}

impl ServiceAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this call is the one that suspended the service.
    pub fn suspend(&self) -> bool {
        !self.suspended.swap(true, Ordering::SeqCst)
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst)
    }
}
