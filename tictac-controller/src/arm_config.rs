use crate::cell_geometry::BoardGeometry;
use crate::pose::Pose;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, time::Duration};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error while accessing configuration")]
    IoError(#[from] std::io::Error),
    #[error("error while parsing json")]
    JsonError(#[from] serde_json::Error),
    #[error("error while parsing yaml")]
    YamlError(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Limb {
    Left,
    Right,
}

const BAXTER_JOINT_SUFFIXES: [&str; 7] = ["s0", "s1", "e0", "e1", "w0", "w1", "w2"];

impl Limb {
    pub fn name(&self) -> &'static str {
        match self {
            Limb::Left => "left",
            Limb::Right => "right",
        }
    }

    /// Joint names from shoulder to wrist.
    ///
    /// Seven joint limbs use the s0..w2 naming of the arm,
    /// other joint counts fall back to numbered joints.
    pub fn joint_names(&self, joint_count: usize) -> Vec<String> {
        if joint_count == BAXTER_JOINT_SUFFIXES.len() {
            BAXTER_JOINT_SUFFIXES
                .iter()
                .map(|suffix| format!("{}_{}", self.name(), suffix))
                .collect()
        } else {
            (0..joint_count)
                .map(|joint| format!("{}_j{}", self.name(), joint))
                .collect()
        }
    }
}

impl fmt::Display for Limb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a limb is allowed to do besides parking itself
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub can_hover: bool,
    pub can_grip: bool,
    pub can_place: bool,
}

impl Capabilities {
    /// Right arm only gets out of the camera's way,
    /// left arm does all of the playing
    pub fn for_limb(limb: Limb) -> Capabilities {
        match limb {
            Limb::Left => Capabilities {
                can_hover: true,
                can_grip: true,
                can_place: true,
            },
            Limb::Right => Capabilities::default(),
        }
    }

    pub fn needs_gripper(&self) -> bool {
        self.can_grip || self.can_place
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NamedPoses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<Pose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standby: Option<Pose>,
    /// above the token stack
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_hover: Option<Pose>,
    /// on top of the token stack, used when vision doesn't supply a location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_pick: Option<Pose>,
    /// above the board center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_hover: Option<Pose>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimingConfig {
    pub arrival_timeout_ms: u64,
    pub arrival_poll_period_ms: u64,
    pub grip_timeout_ms: u64,
    pub grip_poll_period_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> TimingConfig {
        TimingConfig {
            arrival_timeout_ms: 10_000,
            arrival_poll_period_ms: 10,
            grip_timeout_ms: 1_000,
            grip_poll_period_ms: 50,
        }
    }
}

impl TimingConfig {
    pub fn arrival_timeout(&self) -> Duration {
        Duration::from_millis(self.arrival_timeout_ms)
    }

    pub fn arrival_poll_period(&self) -> Duration {
        Duration::from_millis(self.arrival_poll_period_ms)
    }

    pub fn grip_timeout(&self) -> Duration {
        Duration::from_millis(self.grip_timeout_ms)
    }

    pub fn grip_poll_period(&self) -> Duration {
        Duration::from_millis(self.grip_poll_period_ms)
    }
}

fn default_frame_id() -> String {
    String::from("base")
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArmConfig {
    pub limb: Limb,
    pub joint_count: usize,
    /// frame the IK requests are stamped with
    #[serde(default = "default_frame_id")]
    pub frame_id: String,
    pub capabilities: Capabilities,
    pub board: BoardGeometry,
    /// proximity readings closer than this (meters) count as contact
    pub proximity_threshold: f32,
    #[serde(default)]
    pub poses: NamedPoses,
    #[serde(default)]
    pub timing: TimingConfig,
}

impl ArmConfig {
    /// Config for the playing arm packaged with the binary
    pub fn included_left() -> ArmConfig {
        ArmConfig::parse_json(include_str!("../config/left_arm.json"))
            .expect("included left arm config is valid json")
    }

    /// Config for the arm that only parks out of the camera view
    pub fn included_right() -> ArmConfig {
        ArmConfig::parse_json(include_str!("../config/right_arm.json"))
            .expect("included right arm config is valid json")
    }

    pub fn included(limb: Limb) -> ArmConfig {
        match limb {
            Limb::Left => ArmConfig::included_left(),
            Limb::Right => ArmConfig::included_right(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(message: &str) -> Result<()> {
            Err(ConfigError::Invalid(message.to_owned()))
        }
        if self.joint_count == 0 {
            return invalid("joint_count must be at least 1");
        }
        if !(self.board.cell_side > 0.0) {
            return invalid("board.cell_side must be positive");
        }
        if self.board.check_grid().is_err() {
            return invalid("board.grid_dimension must be 3 or 4");
        }
        if !(self.proximity_threshold > 0.0) {
            return invalid("proximity_threshold must be positive");
        }
        let timing = &self.timing;
        if timing.arrival_timeout_ms == 0
            || timing.arrival_poll_period_ms == 0
            || timing.grip_timeout_ms == 0
            || timing.grip_poll_period_ms == 0
        {
            return invalid("timing values must be non zero");
        }
        if self.capabilities.can_hover
            && (self.poses.token_hover.is_none() || self.poses.board_hover.is_none())
        {
            return invalid("hovering limb needs token_hover and board_hover poses");
        }
        if self.capabilities.can_grip && self.poses.token_pick.is_none() {
            return invalid("gripping limb needs a token_pick pose");
        }
        Ok(())
    }

    pub fn parse_json(text: &str) -> Result<ArmConfig> {
        let config: ArmConfig = serde_json::from_str(text)?;
        Ok(config)
    }

    pub fn parse_yaml(text: &str) -> Result<ArmConfig> {
        let config: ArmConfig = serde_yaml::from_str(text)?;
        Ok(config)
    }

    pub fn serialize_to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }

    pub fn serialize_to_yaml(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(yaml)
    }

    pub fn save_json(&self, path: &str) -> Result<()> {
        fs::write(path, self.serialize_to_json()?)?;
        Ok(())
    }

    pub fn save_yaml(&self, path: &str) -> Result<()> {
        fs::write(path, self.serialize_to_yaml()?)?;
        Ok(())
    }

    pub fn load_json(path: &str) -> Result<ArmConfig> {
        let text = fs::read_to_string(path)?;
        ArmConfig::parse_json(&text)
    }

    pub fn load_yaml(path: &str) -> Result<ArmConfig> {
        let text = fs::read_to_string(path)?;
        ArmConfig::parse_yaml(&text)
    }

    /// Picks the parser from the file extension, json unless it's yaml
    pub fn load(path: &str) -> Result<ArmConfig> {
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            ArmConfig::load_yaml(path)
        } else {
            ArmConfig::load_json(path)
        }
    }

    pub fn save(&self, path: &str) -> Result<()> {
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            self.save_yaml(path)
        } else {
            self.save_json(path)
        }
    }
}
