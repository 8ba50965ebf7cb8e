use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared flag checked by the sequencer on every arrival poll.
///
/// Stays set until [`CancelHandle::reset`] so a burst of Ctrl+c
/// stops every remaining move, not just the current one.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
