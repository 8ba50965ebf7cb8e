//! In process stand-in for the arm, its IK service and the vacuum gripper.
//!
//! Joint commands that match the last IK solution are turned into pose
//! feedback after a travel delay, so the sequencer can be exercised
//! without hardware.

use crate::{
    arm_config::{ArmConfig, Limb},
    arm_driver::{
        ArmHardware, IkRequest, IkSolution, InverseKinematicsService, JointCommand,
        JointCommandPublisher, VacuumGripper,
    },
    cancel::CancelHandle,
    motion_sequencer::{MotionError, MotionSequencer},
    pose::Pose,
    pose_tracker::PoseTracker,
    proximity_guard::{ProximityGuard, ProximityReading},
};
use async_trait::async_trait;
use nalgebra as na;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tracing::{debug, warn};

/// Valid band of the hand range sensor
pub const SIM_RANGE_MIN: f32 = 0.004;
pub const SIM_RANGE_MAX: f32 = 0.4;
/// What the sensor reports when nothing is in front of it
pub const SIM_RANGE_NOTHING: f32 = 65.535;

#[derive(Debug, Clone, PartialEq)]
pub struct SimSettings {
    /// time between a joint command and the matching pose feedback
    pub travel_time: Duration,
    /// poses further than this from the base have no IK solution
    pub reach: f64,
    /// bound of the uniform error added to each position component
    pub feedback_noise: f64,
    /// bound of the random tilt applied around each axis, in radians
    pub orientation_noise: f64,
    pub noise_seed: u64,
    pub token_present: bool,
    /// arm ignores commands when false
    pub deliver_feedback: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            travel_time: Duration::from_millis(200),
            reach: 1.1,
            feedback_noise: 0.003,
            orientation_noise: 0.004,
            noise_seed: 7,
            token_present: true,
            deliver_feedback: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GripperCommand {
    Suck,
    Blow,
}

struct RigState {
    last_solution: Option<(Vec<f64>, Pose)>,
    ik_targets: Vec<Pose>,
    commands: Vec<JointCommand>,
    gripper_commands: Vec<GripperCommand>,
    suction: bool,
    token_present: bool,
    rng: StdRng,
}

#[derive(Clone)]
pub struct SimulatedRig {
    config: ArmConfig,
    settings: SimSettings,
    pose_tracker: PoseTracker,
    proximity_guard: ProximityGuard,
    state: Arc<Mutex<RigState>>,
}

impl SimulatedRig {
    pub fn new(config: &ArmConfig, settings: SimSettings) -> Self {
        let state = RigState {
            last_solution: None,
            ik_targets: Vec::new(),
            commands: Vec::new(),
            gripper_commands: Vec::new(),
            suction: false,
            token_present: settings.token_present,
            rng: StdRng::seed_from_u64(settings.noise_seed),
        };
        Self {
            config: config.clone(),
            settings,
            pose_tracker: PoseTracker::new(),
            proximity_guard: ProximityGuard::new(config.proximity_threshold),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn pose_tracker(&self) -> PoseTracker {
        self.pose_tracker.clone()
    }

    pub fn proximity_guard(&self) -> ProximityGuard {
        self.proximity_guard.clone()
    }

    pub fn hardware(&self) -> ArmHardware {
        let gripper: Option<Box<dyn VacuumGripper>> = if self.config.capabilities.needs_gripper()
        {
            Some(Box::new(SimGripper {
                state: self.state.clone(),
            }))
        } else {
            None
        };
        ArmHardware {
            ik_service: Box::new(SimIkService {
                limb: self.config.limb,
                joint_count: self.config.joint_count,
                reach: self.settings.reach,
                state: self.state.clone(),
            }),
            publisher: Box::new(SimJointPublisher {
                pose_tracker: self.pose_tracker.clone(),
                settings: self.settings.clone(),
                state: self.state.clone(),
            }),
            gripper,
        }
    }

    pub fn sequencer(&self, cancel: CancelHandle) -> Result<MotionSequencer, MotionError> {
        MotionSequencer::new(
            self.config.clone(),
            self.hardware(),
            self.pose_tracker(),
            self.proximity_guard(),
            cancel,
        )
    }

    /// Teleport the arm, feedback is delivered right away
    pub fn place_arm(&self, pose: Pose) {
        self.pose_tracker.update(pose);
    }

    /// `None` reports an empty field of view
    pub fn set_obstruction(&self, range: Option<f32>) {
        let range = range.unwrap_or(SIM_RANGE_NOTHING);
        self.proximity_guard
            .update(ProximityReading::new(range, SIM_RANGE_MIN, SIM_RANGE_MAX));
    }

    pub fn set_token_present(&self, present: bool) {
        lock(&self.state).token_present = present;
    }

    pub fn published_commands(&self) -> Vec<JointCommand> {
        lock(&self.state).commands.clone()
    }

    pub fn gripper_commands(&self) -> Vec<GripperCommand> {
        lock(&self.state).gripper_commands.clone()
    }

    /// Every pose the IK service was asked about
    pub fn ik_targets(&self) -> Vec<Pose> {
        lock(&self.state).ik_targets.clone()
    }
}

fn lock(state: &Mutex<RigState>) -> MutexGuard<'_, RigState> {
    // rig state stays usable even if a test panicked while holding it
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Made up but deterministic joint values for a pose
fn joint_values(pose: &Pose, joint_count: usize) -> Vec<f64> {
    let position = pose.position;
    let seed = [
        position.y.atan2(position.x),
        position.z,
        position.x.hypot(position.y),
        pose.orientation.i,
        pose.orientation.j,
        pose.orientation.k,
        pose.orientation.w,
    ];
    (0..joint_count)
        .map(|joint| seed.get(joint).copied().unwrap_or_default())
        .collect()
}

/// Feedback as an imperfect sensor would report `pose`
fn with_noise(pose: &Pose, settings: &SimSettings, rng: &mut StdRng) -> Pose {
    let mut noisy = *pose;
    if settings.feedback_noise > 0.0 {
        for component in noisy.position.iter_mut() {
            *component += rng.random_range(-settings.feedback_noise..=settings.feedback_noise);
        }
    }
    if settings.orientation_noise > 0.0 {
        let bound = settings.orientation_noise;
        let mut angle = || rng.random_range(-bound..=bound);
        let tilt = na::UnitQuaternion::from_euler_angles(angle(), angle(), angle());
        let orientation = na::UnitQuaternion::from_quaternion(pose.orientation);
        noisy.orientation = (tilt * orientation).into_inner();
    }
    noisy
}

struct SimIkService {
    limb: Limb,
    joint_count: usize,
    reach: f64,
    state: Arc<Mutex<RigState>>,
}

#[async_trait]
impl InverseKinematicsService for SimIkService {
    async fn solve_position_ik(&self, request: &IkRequest) -> anyhow::Result<IkSolution> {
        if request.limb != self.limb {
            anyhow::bail!("no ik service for {} limb", request.limb);
        }
        let mut state = lock(&self.state);
        state.ik_targets.push(request.pose);
        if request.pose.position.norm() > self.reach {
            return Ok(IkSolution::invalid());
        }
        let angles = joint_values(&request.pose, self.joint_count);
        state.last_solution = Some((angles.clone(), request.pose));
        Ok(IkSolution {
            joint_names: self.limb.joint_names(self.joint_count),
            angles,
            valid: true,
        })
    }
}

struct SimJointPublisher {
    pose_tracker: PoseTracker,
    settings: SimSettings,
    state: Arc<Mutex<RigState>>,
}

impl JointCommandPublisher for SimJointPublisher {
    fn publish(&mut self, command: JointCommand) {
        let target = {
            let mut state = lock(&self.state);
            let target = state
                .last_solution
                .as_ref()
                .filter(|(angles, _)| *angles == command.command)
                .map(|(_, pose)| *pose);
            state.commands.push(command);
            target
        };
        let Some(target) = target else {
            warn!("joint command doesn't match any ik solution, arm stays put");
            return;
        };
        if !self.settings.deliver_feedback {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no runtime to deliver feedback on");
            return;
        };
        let arrived = {
            let mut state = lock(&self.state);
            with_noise(&target, &self.settings, &mut state.rng)
        };
        let pose_tracker = self.pose_tracker.clone();
        let travel_time = self.settings.travel_time;
        runtime.spawn(async move {
            tokio::time::sleep(travel_time).await;
            debug!(?arrived, "simulated arm arrived");
            pose_tracker.update(arrived);
        });
    }
}

struct SimGripper {
    state: Arc<Mutex<RigState>>,
}

#[async_trait]
impl VacuumGripper for SimGripper {
    async fn suck(&mut self) -> anyhow::Result<()> {
        let mut state = lock(&self.state);
        state.suction = true;
        state.gripper_commands.push(GripperCommand::Suck);
        Ok(())
    }

    async fn blow(&mut self) -> anyhow::Result<()> {
        let mut state = lock(&self.state);
        state.suction = false;
        state.gripper_commands.push(GripperCommand::Blow);
        Ok(())
    }

    async fn is_gripping(&mut self) -> anyhow::Result<bool> {
        let state = lock(&self.state);
        Ok(state.suction && state.token_present)
    }
}
