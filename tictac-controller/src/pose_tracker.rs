use crate::pose::Pose;
use std::sync::Arc;
use tokio::sync::watch;

/// Last known end effector pose.
///
/// Clones share the same cell. Feedback handlers call [`PoseTracker::update`],
/// the sequencer only reads. Every update replaces the whole snapshot.
#[derive(Clone, Debug)]
pub struct PoseTracker {
    latest: Arc<watch::Sender<Option<Pose>>>,
}

impl Default for PoseTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseTracker {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            latest: Arc::new(sender),
        }
    }

    /// Last writer wins, delivery order is trusted
    pub fn update(&self, pose: Pose) {
        self.latest.send_replace(Some(pose));
    }

    /// `None` until the first feedback arrives
    pub fn current(&self) -> Option<Pose> {
        *self.latest.borrow()
    }
}
