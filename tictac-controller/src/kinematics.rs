use crate::arm_config::Limb;
use crate::arm_driver::{IkRequest, InverseKinematicsService, JointCommand};
use crate::pose::Pose;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum KinematicsError {
    #[error("no joint solution reaches {0:?}")]
    Unreachable(Pose),
    #[error("inverse kinematics service unavailable")]
    ServiceUnavailable(#[source] anyhow::Error),
    #[error("solver returned {actual} joint angles, limb has {expected}")]
    JointCountMismatch { expected: usize, actual: usize },
}

type Result<T> = std::result::Result<T, KinematicsError>;

/// Joint angles from shoulder to wrist.
///
/// Only produced by [`KinematicsClient::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct JointAngles {
    names: Vec<String>,
    angles: Vec<f64>,
}

impl JointAngles {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn into_command(self) -> JointCommand {
        JointCommand::position(self.names, self.angles)
    }
}

pub struct KinematicsClient {
    service: Box<dyn InverseKinematicsService>,
    limb: Limb,
    joint_count: usize,
    frame_id: String,
}

impl KinematicsClient {
    pub fn new(
        service: Box<dyn InverseKinematicsService>,
        limb: Limb,
        joint_count: usize,
        frame_id: &str,
    ) -> KinematicsClient {
        KinematicsClient {
            service,
            limb,
            joint_count,
            frame_id: frame_id.to_owned(),
        }
    }

    /// Ask the solver for joint angles reaching `target`.
    ///
    /// Failures are returned as is, retrying an unreachable pose
    /// gives the solver no new information.
    pub async fn solve(&self, target: &Pose) -> Result<JointAngles> {
        let request = IkRequest {
            limb: self.limb,
            frame_id: self.frame_id.clone(),
            pose: *target,
        };
        let solution = self
            .service
            .solve_position_ik(&request)
            .await
            .map_err(KinematicsError::ServiceUnavailable)?;
        if !solution.valid {
            return Err(KinematicsError::Unreachable(*target));
        }
        if solution.angles.len() != self.joint_count {
            return Err(KinematicsError::JointCountMismatch {
                expected: self.joint_count,
                actual: solution.angles.len(),
            });
        }
        let names = if solution.joint_names.len() == self.joint_count {
            solution.joint_names
        } else {
            self.limb.joint_names(self.joint_count)
        };
        debug!(limb = %self.limb, angles = ?solution.angles, "ik solved");
        Ok(JointAngles {
            names,
            angles: solution.angles,
        })
    }
}
