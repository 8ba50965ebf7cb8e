use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Single reading of the hand mounted range sensor.
///
/// The sensor reports its own valid band with each reading.
/// Anything outside of it means nothing was detected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityReading {
    pub range: f32,
    pub min_range: f32,
    pub max_range: f32,
}

impl ProximityReading {
    pub fn new(range: f32, min_range: f32, max_range: f32) -> ProximityReading {
        ProximityReading {
            range,
            min_range,
            max_range,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.range >= self.min_range && self.range <= self.max_range
    }
}

/// Detects unexpected contact from proximity feedback.
///
/// Clones share the same reading.
#[derive(Clone, Debug)]
pub struct ProximityGuard {
    threshold: f32,
    latest: Arc<watch::Sender<Option<ProximityReading>>>,
}

impl ProximityGuard {
    pub fn new(threshold: f32) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            threshold,
            latest: Arc::new(sender),
        }
    }

    pub fn update(&self, reading: ProximityReading) {
        self.latest.send_replace(Some(reading));
    }

    pub fn latest(&self) -> Option<ProximityReading> {
        *self.latest.borrow()
    }

    /// Something sits closer than the threshold.
    ///
    /// Without any reading this is false, a missing sensor must not
    /// block motion forever.
    pub fn has_collided(&self) -> bool {
        match self.latest() {
            Some(reading) => reading.is_valid() && reading.range < self.threshold,
            None => false,
        }
    }
}
