//! Motion control for a two armed robot playing tic-tac-toe.
//!
//! One arm parks out of the camera view, the other moves tokens from the
//! stack onto board cells. High level intents are turned into IK requests
//! and joint commands, and every move is verified against pose and
//! proximity feedback before it counts as done.

pub mod arm_config;
pub mod arm_driver;
pub mod cancel;
pub mod cell_geometry;
pub mod gripper;
pub mod kinematics;
pub mod motion_sequencer;
pub mod pose;
pub mod pose_tracker;
pub mod proximity_guard;
pub mod simulator;
