use crate::{
    arm_config::{ArmConfig, Capabilities, ConfigError, Limb, NamedPoses},
    arm_driver::{ArmHardware, JointCommandPublisher},
    cancel::CancelHandle,
    cell_geometry::{BoardGeometry, CellError},
    gripper::{GripperError, GripperInterlock},
    kinematics::{KinematicsClient, KinematicsError},
    pose::Pose,
    pose_tracker::PoseTracker,
    proximity_guard::ProximityGuard,
};
use std::{fmt, sync::Arc, time::Duration};
use thiserror::Error;
use tokio::{
    sync::Mutex,
    time::{sleep, Instant},
};
use tracing::{debug, info, trace, warn};

#[derive(Error, Debug)]
pub enum MotionError {
    #[error("inverse kinematics failed")]
    SolverError(#[from] KinematicsError),
    #[error("proximity sensor detected contact at {range} m")]
    CollisionDetected { range: f32 },
    #[error("gripper failed")]
    GripFailure(#[from] GripperError),
    #[error("arm did not reach target within {waited:?}")]
    ArrivalTimeout {
        waited: Duration,
        last_pose: Option<Pose>,
    },
    #[error("invalid board cell")]
    InvalidCellIndex(#[from] CellError),
    #[error("motion cancelled")]
    Cancelled,
    #[error("{limb} limb can't {intent}")]
    UnsupportedIntent { limb: Limb, intent: MotionIntent },
    #[error("no token held to release")]
    NotHoldingToken,
    #[error("another intent is already in flight")]
    Busy,
    #[error("limb is configured to grip but has no gripper")]
    MissingGripper,
    #[error("invalid arm configuration")]
    Config(#[from] ConfigError),
}

type Result<T> = std::result::Result<T, MotionError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionIntent {
    /// Park the arm outside of the camera view
    MoveRightToRest,
    /// Wait between turns
    MoveLeftToStandby,
    HoverAboveTokens,
    /// Pick from `token`, or from the configured stack pose when vision
    /// didn't locate one
    GripToken { token: Option<Pose> },
    HoverAboveBoard,
    ReleaseToken { cell: usize },
}

impl fmt::Display for MotionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionIntent::MoveRightToRest => write!(f, "move-right-to-rest"),
            MotionIntent::MoveLeftToStandby => write!(f, "move-left-to-standby"),
            MotionIntent::HoverAboveTokens => write!(f, "hover-above-tokens"),
            MotionIntent::GripToken { .. } => write!(f, "grip-token"),
            MotionIntent::HoverAboveBoard => write!(f, "hover-above-board"),
            MotionIntent::ReleaseToken { cell } => write!(f, "release-token({})", cell),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GripperAction {
    Grip,
    Release,
}

impl MotionIntent {
    fn gripper_action(&self) -> Option<GripperAction> {
        match self {
            MotionIntent::GripToken { .. } => Some(GripperAction::Grip),
            MotionIntent::ReleaseToken { .. } => Some(GripperAction::Release),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    AwaitingSolve,
    Moving,
    VerifyingArrival,
    GrippingOrReleasing,
    /// Last intent failed, the next dispatch starts over
    Aborted,
}

/// Turns intents into verified joint motion for a single limb.
///
/// One intent runs at a time. Every failure aborts only that intent and is
/// returned to the caller, nothing is retried here.
pub struct MotionSequencer {
    limb: Limb,
    capabilities: Capabilities,
    poses: NamedPoses,
    board: BoardGeometry,
    kinematics: KinematicsClient,
    publisher: Box<dyn JointCommandPublisher>,
    gripper: Option<GripperInterlock>,
    pose_tracker: PoseTracker,
    proximity_guard: ProximityGuard,
    arrival_timeout: Duration,
    poll_period: Duration,
    cancel: CancelHandle,
    state: SequencerState,
    holding_token: bool,
}

impl MotionSequencer {
    pub fn new(
        config: ArmConfig,
        hardware: ArmHardware,
        pose_tracker: PoseTracker,
        proximity_guard: ProximityGuard,
        cancel: CancelHandle,
    ) -> Result<Self> {
        config.validate()?;
        let ArmHardware {
            ik_service,
            publisher,
            gripper,
        } = hardware;
        if config.capabilities.needs_gripper() && gripper.is_none() {
            return Err(MotionError::MissingGripper);
        }
        let gripper = gripper.map(|gripper| {
            GripperInterlock::new(
                gripper,
                config.timing.grip_timeout(),
                config.timing.grip_poll_period(),
            )
        });
        let kinematics =
            KinematicsClient::new(ik_service, config.limb, config.joint_count, &config.frame_id);
        Ok(Self {
            limb: config.limb,
            capabilities: config.capabilities,
            arrival_timeout: config.timing.arrival_timeout(),
            poll_period: config.timing.arrival_poll_period(),
            poses: config.poses,
            board: config.board,
            kinematics,
            publisher,
            gripper,
            pose_tracker,
            proximity_guard,
            cancel,
            state: SequencerState::Idle,
            holding_token: false,
        })
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Only true after suction was confirmed and until the token is released
    pub fn is_holding_token(&self) -> bool {
        self.holding_token
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn board(&self) -> &BoardGeometry {
        &self.board
    }

    /// Run one intent to completion.
    pub async fn dispatch(&mut self, intent: MotionIntent) -> Result<()> {
        if !matches!(self.state, SequencerState::Idle | SequencerState::Aborted) {
            // the future of the previous dispatch was dropped mid flight
            warn!(limb = %self.limb, state = ?self.state, "previous intent never resolved");
        }
        info!(limb = %self.limb, %intent, "dispatching intent");
        match self.execute(&intent).await {
            Ok(()) => {
                self.transition(SequencerState::Idle);
                info!(limb = %self.limb, %intent, "intent resolved");
                Ok(())
            }
            Err(error) => {
                self.transition(SequencerState::Aborted);
                warn!(limb = %self.limb, %intent, %error, "intent aborted");
                Err(error)
            }
        }
    }

    pub async fn move_to_rest(&mut self) -> Result<()> {
        self.dispatch(MotionIntent::MoveRightToRest).await
    }

    pub async fn move_to_standby(&mut self) -> Result<()> {
        self.dispatch(MotionIntent::MoveLeftToStandby).await
    }

    /// Hover over the stack, grip a token and lift it back up
    pub async fn pick_up_token(&mut self, token: Option<Pose>) -> Result<()> {
        self.dispatch(MotionIntent::HoverAboveTokens).await?;
        self.dispatch(MotionIntent::GripToken { token }).await?;
        self.dispatch(MotionIntent::HoverAboveTokens).await
    }

    /// Carry the held token over the board, drop it on `cell` and lift back up
    pub async fn place_token(&mut self, cell: usize) -> Result<()> {
        if !self.holding_token {
            warn!(limb = %self.limb, cell, "asked to place without a token");
            return Err(MotionError::NotHoldingToken);
        }
        // bad cells fail before the arm starts moving
        self.board.pose_for_cell(cell)?;
        self.dispatch(MotionIntent::HoverAboveBoard).await?;
        self.dispatch(MotionIntent::ReleaseToken { cell }).await?;
        self.dispatch(MotionIntent::HoverAboveBoard).await
    }

    async fn execute(&mut self, intent: &MotionIntent) -> Result<()> {
        self.transition(SequencerState::AwaitingSolve);
        self.check_allowed(intent)?;
        let target = self.target_for(intent)?;
        let joints = self.kinematics.solve(&target).await?;

        self.transition(SequencerState::Moving);
        self.publisher.publish(joints.into_command());

        self.transition(SequencerState::VerifyingArrival);
        self.verify_arrival(&target).await?;

        if let Some(action) = intent.gripper_action() {
            self.transition(SequencerState::GrippingOrReleasing);
            self.actuate_gripper(action).await?;
        }
        Ok(())
    }

    fn check_allowed(&self, intent: &MotionIntent) -> Result<()> {
        let allowed = match intent {
            MotionIntent::MoveRightToRest => self.poses.rest.is_some(),
            MotionIntent::MoveLeftToStandby => self.poses.standby.is_some(),
            MotionIntent::HoverAboveTokens | MotionIntent::HoverAboveBoard => {
                self.capabilities.can_hover
            }
            MotionIntent::GripToken { .. } => self.capabilities.can_grip,
            MotionIntent::ReleaseToken { .. } => self.capabilities.can_place,
        };
        if !allowed {
            return Err(MotionError::UnsupportedIntent {
                limb: self.limb,
                intent: *intent,
            });
        }
        if matches!(intent, MotionIntent::ReleaseToken { .. }) && !self.holding_token {
            return Err(MotionError::NotHoldingToken);
        }
        Ok(())
    }

    fn target_for(&self, intent: &MotionIntent) -> Result<Pose> {
        let target = match intent {
            MotionIntent::MoveRightToRest => self.poses.rest,
            MotionIntent::MoveLeftToStandby => self.poses.standby,
            MotionIntent::HoverAboveTokens => self.poses.token_hover,
            MotionIntent::GripToken { token } => token.or(self.poses.token_pick),
            MotionIntent::HoverAboveBoard => self.poses.board_hover,
            MotionIntent::ReleaseToken { cell } => Some(self.board.pose_for_cell(*cell)?),
        };
        target.ok_or_else(|| MotionError::UnsupportedIntent {
            limb: self.limb,
            intent: *intent,
        })
    }

    /// Poll feedback until the arm sits on `target`.
    ///
    /// Order of checks per poll: contact, arrival, cancellation, timeout.
    async fn verify_arrival(&self, target: &Pose) -> Result<()> {
        let started = Instant::now();
        let deadline = started + self.arrival_timeout;
        let mut polls: u32 = 0;
        loop {
            polls += 1;
            if self.proximity_guard.has_collided() {
                let range = self
                    .proximity_guard
                    .latest()
                    .map(|reading| reading.range)
                    .unwrap_or_default();
                return Err(MotionError::CollisionDetected { range });
            }
            let current = self.pose_tracker.current();
            if let Some(pose) = current {
                if pose.approx_eq(target) {
                    debug!(limb = %self.limb, polls, elapsed = ?started.elapsed(), "arrived");
                    return Ok(());
                }
            }
            if self.cancel.is_cancelled() {
                return Err(MotionError::Cancelled);
            }
            if Instant::now() >= deadline {
                return Err(MotionError::ArrivalTimeout {
                    waited: started.elapsed(),
                    last_pose: current,
                });
            }
            trace!(limb = %self.limb, polls, ?current, "waiting for arrival");
            sleep(self.poll_period).await;
        }
    }

    async fn actuate_gripper(&mut self, action: GripperAction) -> Result<()> {
        let gripper = self.gripper.as_mut().ok_or(MotionError::MissingGripper)?;
        match action {
            GripperAction::Grip => {
                self.holding_token = false;
                gripper.grip_token().await?;
                self.holding_token = true;
            }
            GripperAction::Release => {
                gripper.release().await?;
                self.holding_token = false;
            }
        }
        Ok(())
    }

    fn transition(&mut self, next: SequencerState) {
        trace!(limb = %self.limb, from = ?self.state, to = ?next, "state change");
        self.state = next;
    }
}

/// Sequencer shared between tasks.
///
/// Dispatching while another intent is in flight is rejected with
/// [`MotionError::Busy`] instead of being queued.
#[derive(Clone)]
pub struct SharedSequencer {
    inner: Arc<Mutex<MotionSequencer>>,
}

impl SharedSequencer {
    pub fn new(sequencer: MotionSequencer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sequencer)),
        }
    }

    pub async fn try_dispatch(&self, intent: MotionIntent) -> Result<()> {
        let mut sequencer = self.inner.try_lock().map_err(|_| MotionError::Busy)?;
        sequencer.dispatch(intent).await
    }

    /// `None` while an intent is in flight
    pub fn try_state(&self) -> Option<SequencerState> {
        self.inner.try_lock().ok().map(|sequencer| sequencer.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm_config::ArmConfig;
    use crate::cell_geometry::placement_orientation;
    use crate::simulator::{GripperCommand, SimSettings, SimulatedRig};
    use nalgebra as na;

    fn left_rig(settings: SimSettings) -> (SimulatedRig, MotionSequencer) {
        let rig = SimulatedRig::new(&ArmConfig::included_left(), settings);
        let sequencer = rig.sequencer(CancelHandle::new()).unwrap();
        (rig, sequencer)
    }

    #[tokio::test(start_paused = true)]
    async fn hover_above_tokens_never_touches_gripper() {
        let (rig, mut sequencer) = left_rig(SimSettings::default());
        sequencer
            .dispatch(MotionIntent::HoverAboveTokens)
            .await
            .unwrap();
        assert_eq!(sequencer.state(), SequencerState::Idle);
        assert!(rig.gripper_commands().is_empty());
        let commands = rig.published_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].command.len(), 7);
        assert_eq!(commands[0].mode, crate::arm_driver::POSITION_MODE);
        let expected = ArmConfig::included_left().poses.token_hover.unwrap();
        assert!(rig.pose_tracker().current().unwrap().approx_eq(&expected));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_grip_aborts_and_blocks_placing() {
        let (rig, mut sequencer) = left_rig(SimSettings {
            token_present: false,
            ..Default::default()
        });
        let error = sequencer
            .dispatch(MotionIntent::GripToken { token: None })
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            MotionError::GripFailure(GripperError::SuctionNotConfirmed { .. })
        ));
        assert_eq!(sequencer.state(), SequencerState::Aborted);
        assert!(!sequencer.is_holding_token());

        let error = sequencer
            .dispatch(MotionIntent::ReleaseToken { cell: 4 })
            .await
            .unwrap_err();
        assert!(matches!(error, MotionError::NotHoldingToken));
        let error = sequencer.place_token(4).await.unwrap_err();
        assert!(matches!(error, MotionError::NotHoldingToken));
        // only the grip move was commanded
        assert_eq!(rig.published_commands().len(), 1);
        assert_eq!(
            rig.gripper_commands(),
            vec![GripperCommand::Suck, GripperCommand::Blow]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn releasing_on_center_cell_targets_board_center() {
        let (rig, mut sequencer) = left_rig(SimSettings::default());
        sequencer
            .dispatch(MotionIntent::GripToken { token: None })
            .await
            .unwrap();
        assert!(sequencer.is_holding_token());
        sequencer
            .dispatch(MotionIntent::ReleaseToken { cell: 4 })
            .await
            .unwrap();
        let expected = Pose::new(na::Vector3::new(0.65, 0.0, -0.14), placement_orientation());
        assert_eq!(rig.ik_targets().last(), Some(&expected));
        assert!(rig.pose_tracker().current().unwrap().approx_eq(&expected));
        assert!(!sequencer.is_holding_token());
        assert_eq!(
            rig.gripper_commands(),
            vec![GripperCommand::Suck, GripperCommand::Blow]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_pose_aborts_without_command() {
        let (rig, mut sequencer) = left_rig(SimSettings {
            reach: 0.1,
            ..Default::default()
        });
        let error = sequencer
            .dispatch(MotionIntent::HoverAboveBoard)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            MotionError::SolverError(KinematicsError::Unreachable(_))
        ));
        assert_eq!(sequencer.state(), SequencerState::Aborted);
        assert!(rig.published_commands().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slightly_low_and_tilted_feedback_counts_as_arrival() {
        let (rig, mut sequencer) = left_rig(SimSettings {
            deliver_feedback: false,
            ..Default::default()
        });
        // board hover, 0.1 mm low on x and tilted 0.3 degrees
        rig.place_arm(Pose::from_components(
            0.6499, 0.0, 0.1199, 0.0, 0.9999966, 0.0, 0.0026,
        ));
        sequencer
            .dispatch(MotionIntent::HoverAboveBoard)
            .await
            .unwrap();
        assert_eq!(sequencer.state(), SequencerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn noisy_feedback_still_completes_turns() {
        for seed in 0..8 {
            let (rig, mut sequencer) = left_rig(SimSettings {
                feedback_noise: 0.004,
                orientation_noise: 0.006,
                noise_seed: seed,
                ..Default::default()
            });
            sequencer.move_to_standby().await.unwrap();
            sequencer.pick_up_token(None).await.unwrap();
            sequencer.place_token(seed as usize % 9).await.unwrap();
            sequencer.move_to_standby().await.unwrap();
            let arrived = rig.pose_tracker().current().unwrap();
            let standby = ArmConfig::included_left().poses.standby.unwrap();
            assert_ne!(arrived, standby);
            assert!(arrived.approx_eq(&standby));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn contact_aborts_motion() {
        let (rig, mut sequencer) = left_rig(SimSettings::default());
        rig.set_obstruction(Some(0.05));
        let error = sequencer
            .dispatch(MotionIntent::HoverAboveBoard)
            .await
            .unwrap_err();
        assert!(matches!(error, MotionError::CollisionDetected { range } if range == 0.05));
        assert_eq!(sequencer.state(), SequencerState::Aborted);
        assert_eq!(rig.published_commands().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn contact_outranks_arrival() {
        let (rig, mut sequencer) = left_rig(SimSettings::default());
        rig.place_arm(ArmConfig::included_left().poses.board_hover.unwrap());
        rig.set_obstruction(Some(0.01));
        let error = sequencer
            .dispatch(MotionIntent::HoverAboveBoard)
            .await
            .unwrap_err();
        assert!(matches!(error, MotionError::CollisionDetected { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_sensor_does_not_stop_motion() {
        let (rig, mut sequencer) = left_rig(SimSettings::default());
        rig.set_obstruction(None);
        sequencer
            .dispatch(MotionIntent::HoverAboveBoard)
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn frozen_arm_times_out() {
        let (_rig, mut sequencer) = left_rig(SimSettings {
            deliver_feedback: false,
            ..Default::default()
        });
        let error = sequencer
            .dispatch(MotionIntent::MoveLeftToStandby)
            .await
            .unwrap_err();
        match error {
            MotionError::ArrivalTimeout { waited, last_pose } => {
                assert!(waited >= Duration::from_secs(10));
                assert_eq!(last_pose, None);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(sequencer.state(), SequencerState::Aborted);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_verification() {
        let (rig, mut sequencer) = left_rig(SimSettings::default());
        let cancel = sequencer.cancel_handle();
        cancel.cancel();
        let error = sequencer
            .dispatch(MotionIntent::MoveLeftToStandby)
            .await
            .unwrap_err();
        assert!(matches!(error, MotionError::Cancelled));
        // the command still went out before verification
        assert_eq!(rig.published_commands().len(), 1);

        cancel.reset();
        sequencer.move_to_standby().await.unwrap();
        assert_eq!(sequencer.state(), SequencerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_sequencer_accepts_next_intent() {
        let (rig, mut sequencer) = left_rig(SimSettings::default());
        rig.set_obstruction(Some(0.02));
        assert!(sequencer.move_to_standby().await.is_err());
        assert_eq!(sequencer.state(), SequencerState::Aborted);
        rig.set_obstruction(None);
        sequencer.move_to_standby().await.unwrap();
        assert_eq!(sequencer.state(), SequencerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn resting_limb_only_rests() {
        let rig = SimulatedRig::new(&ArmConfig::included_right(), SimSettings::default());
        let mut sequencer = rig.sequencer(CancelHandle::new()).unwrap();
        let error = sequencer
            .dispatch(MotionIntent::HoverAboveTokens)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            MotionError::UnsupportedIntent {
                limb: Limb::Right,
                intent: MotionIntent::HoverAboveTokens
            }
        ));
        assert!(matches!(
            sequencer.move_to_standby().await,
            Err(MotionError::UnsupportedIntent { .. })
        ));
        assert!(rig.published_commands().is_empty());
        sequencer.move_to_rest().await.unwrap();
        assert_eq!(rig.published_commands()[0].names[0], "right_s0");
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_cell_fails_before_moving() {
        let (rig, mut sequencer) = left_rig(SimSettings::default());
        sequencer.pick_up_token(None).await.unwrap();
        let moves = rig.published_commands().len();
        let error = sequencer.place_token(9).await.unwrap_err();
        assert!(matches!(
            error,
            MotionError::InvalidCellIndex(CellError::InvalidCellIndex { index: 9, cells: 9 })
        ));
        let error = sequencer
            .dispatch(MotionIntent::ReleaseToken { cell: 12 })
            .await
            .unwrap_err();
        assert!(matches!(error, MotionError::InvalidCellIndex(_)));
        assert_eq!(rig.published_commands().len(), moves);
        assert!(sequencer.is_holding_token());
    }

    #[tokio::test(start_paused = true)]
    async fn pick_and_place_turn() {
        let (rig, mut sequencer) = left_rig(SimSettings::default());
        sequencer.move_to_standby().await.unwrap();
        sequencer.pick_up_token(None).await.unwrap();
        assert!(sequencer.is_holding_token());
        sequencer.place_token(8).await.unwrap();
        assert!(!sequencer.is_holding_token());
        sequencer.move_to_standby().await.unwrap();
        // standby, hover, pick, hover, hover, cell, hover, standby
        assert_eq!(rig.published_commands().len(), 8);
        let cell = sequencer.board().pose_for_cell(8).unwrap();
        assert!(rig.ik_targets()[5].approx_eq(&cell));
    }

    #[tokio::test(start_paused = true)]
    async fn vision_supplied_token_pose_is_used() {
        let (rig, mut sequencer) = left_rig(SimSettings::default());
        let token = Pose::from_components(0.5, 0.6, -0.12, 0.0, 1.0, 0.0, 0.0);
        sequencer
            .dispatch(MotionIntent::GripToken { token: Some(token) })
            .await
            .unwrap();
        assert_eq!(rig.ik_targets(), vec![token]);
    }

    #[tokio::test(start_paused = true)]
    async fn shared_sequencer_rejects_concurrent_dispatch() {
        let (_rig, sequencer) = left_rig(SimSettings::default());
        let shared = SharedSequencer::new(sequencer);
        let first = tokio::spawn({
            let shared = shared.clone();
            async move { shared.try_dispatch(MotionIntent::HoverAboveBoard).await }
        });
        // let the first dispatch start polling
        tokio::task::yield_now().await;
        assert_eq!(shared.try_state(), None);
        let second = shared.try_dispatch(MotionIntent::HoverAboveTokens).await;
        assert!(matches!(second, Err(MotionError::Busy)));
        first.await.unwrap().unwrap();
        assert_eq!(shared.try_state(), Some(SequencerState::Idle));
    }

    #[test]
    fn gripping_limb_needs_gripper() {
        let config = ArmConfig::included_left();
        let rig = SimulatedRig::new(&config, SimSettings::default());
        let mut hardware = rig.hardware();
        hardware.gripper = None;
        let result = MotionSequencer::new(
            config,
            hardware,
            rig.pose_tracker(),
            rig.proximity_guard(),
            CancelHandle::new(),
        );
        assert!(matches!(result, Err(MotionError::MissingGripper)));
    }

    #[test]
    fn intents_display_like_their_names() {
        assert_eq!(
            MotionIntent::ReleaseToken { cell: 4 }.to_string(),
            "release-token(4)"
        );
        assert_eq!(
            MotionIntent::GripToken { token: None }.to_string(),
            "grip-token"
        );
    }
}
