//! Traits at the edge of the controller.
//!
//! Transport, the vendor IK solver and the vacuum electronics live behind
//! these so the sequencer can run against real hardware or the simulator.

use crate::arm_config::Limb;
use crate::pose::Pose;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct IkRequest {
    pub limb: Limb,
    pub frame_id: String,
    pub pose: Pose,
}

/// Raw answer of the solver
#[derive(Debug, Clone, PartialEq)]
pub struct IkSolution {
    pub joint_names: Vec<String>,
    pub angles: Vec<f64>,
    /// solver found a joint configuration reaching the pose
    pub valid: bool,
}

impl IkSolution {
    pub fn invalid() -> IkSolution {
        IkSolution {
            joint_names: vec![],
            angles: vec![],
            valid: false,
        }
    }
}

#[async_trait]
pub trait InverseKinematicsService: Send + Sync {
    /// Errors mean the service couldn't be reached.
    /// An unreachable pose is reported through `IkSolution::valid`
    async fn solve_position_ik(&self, request: &IkRequest) -> anyhow::Result<IkSolution>;
}

/// Mode id the joint controller expects for position control
pub const POSITION_MODE: u8 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct JointCommand {
    pub mode: u8,
    pub names: Vec<String>,
    pub command: Vec<f64>,
}

impl JointCommand {
    pub fn position(names: Vec<String>, command: Vec<f64>) -> JointCommand {
        JointCommand {
            mode: POSITION_MODE,
            names,
            command,
        }
    }
}

/// Fire and forget, there is no delivery confirmation from the joint controller
pub trait JointCommandPublisher: Send + Sync {
    fn publish(&mut self, command: JointCommand);
}

#[async_trait]
pub trait VacuumGripper: Send + Sync {
    /// Turn suction on
    async fn suck(&mut self) -> anyhow::Result<()>;
    /// Turn suction off and release whatever is attached
    async fn blow(&mut self) -> anyhow::Result<()>;
    /// Suction is confirmed by the pressure sensor, not by the last command
    async fn is_gripping(&mut self) -> anyhow::Result<bool>;
}

/// Everything a sequencer needs to move one limb
pub struct ArmHardware {
    pub ik_service: Box<dyn InverseKinematicsService>,
    pub publisher: Box<dyn JointCommandPublisher>,
    pub gripper: Option<Box<dyn VacuumGripper>>,
}
