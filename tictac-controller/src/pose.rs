use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Cartesian pose of an end effector.
///
/// Used both for feedback from the arm and for requested targets.
/// Orientation is serialized in `[x, y, z, w]` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: na::Vector3<f64>,
    pub orientation: na::Quaternion<f64>,
}

impl Pose {
    pub fn new(position: na::Vector3<f64>, orientation: na::Quaternion<f64>) -> Pose {
        Pose {
            position,
            orientation,
        }
    }

    pub fn from_components(
        x: f64,
        y: f64,
        z: f64,
        qx: f64,
        qy: f64,
        qz: f64,
        qw: f64,
    ) -> Pose {
        Pose::new(
            na::Vector3::new(x, y, z),
            na::Quaternion::new(qw, qx, qy, qz),
        )
    }

    /// Position followed by orientation in x, y, z, w order
    pub fn components(&self) -> [f64; 7] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.orientation.i,
            self.orientation.j,
            self.orientation.k,
            self.orientation.w,
        ]
    }

    /// Tolerant comparison used for arrival detection.
    ///
    /// Feedback and solver output both carry noise so every component
    /// only has to agree to two decimal places.
    pub fn approx_eq(&self, other: &Pose) -> bool {
        self.components()
            .iter()
            .zip(other.components().iter())
            .all(|(a, b)| equal_two_dp(*a, *b))
    }
}

/// Hundredths tolerance, shrunk so a difference of exactly 0.01 that
/// picked up representation error on subtraction still counts as unequal
const TWO_DP_TOLERANCE: f64 = 0.01 - 1e-9;

/// Two floats are equal if they are less than a hundredth apart.
///
/// The band is symmetric, feedback just below a target matches as well as
/// feedback just above it.
pub fn equal_two_dp(x: f64, y: f64) -> bool {
    (x - y).abs() < TWO_DP_TOLERANCE
}
