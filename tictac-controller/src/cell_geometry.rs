use crate::pose::Pose;
use nalgebra as na;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Height of the board surface in the base frame
pub const DEFAULT_BOARD_HEIGHT: f64 = -0.14;
/// Tic-tac-toe board
pub const DEFAULT_GRID_DIMENSION: usize = 3;

/// Gripper pointing straight down onto the board.
pub fn placement_orientation() -> na::Quaternion<f64> {
    na::Quaternion::new(0.0, 0.0, 1.0, 0.0)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("cell index {index} outside of board with {cells} cells")]
    InvalidCellIndex { index: usize, cells: usize },
    #[error("{0}x{0} boards aren't supported, grid dimension must be 3 or 4")]
    UnsupportedGrid(usize),
}

type Result<T> = std::result::Result<T, CellError>;

/// Placement geometry of a square board.
///
/// Cells are numbered row major starting at 0.
/// Rows advance along x and columns along y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub center_x: f64,
    pub center_y: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    pub cell_side: f64,
    #[serde(default = "default_grid_dimension")]
    pub grid_dimension: usize,
    #[serde(default = "placement_orientation")]
    pub orientation: na::Quaternion<f64>,
}

fn default_height() -> f64 {
    DEFAULT_BOARD_HEIGHT
}

fn default_grid_dimension() -> usize {
    DEFAULT_GRID_DIMENSION
}

impl BoardGeometry {
    pub fn new(center_x: f64, center_y: f64, cell_side: f64) -> BoardGeometry {
        BoardGeometry {
            center_x,
            center_y,
            height: DEFAULT_BOARD_HEIGHT,
            cell_side,
            grid_dimension: DEFAULT_GRID_DIMENSION,
            orientation: placement_orientation(),
        }
    }

    pub fn with_grid_dimension(mut self, grid_dimension: usize) -> BoardGeometry {
        self.grid_dimension = grid_dimension;
        self
    }

    pub fn check_grid(&self) -> Result<()> {
        if matches!(self.grid_dimension, 3 | 4) {
            Ok(())
        } else {
            Err(CellError::UnsupportedGrid(self.grid_dimension))
        }
    }

    pub fn cell_count(&self) -> usize {
        self.grid_dimension.saturating_mul(self.grid_dimension)
    }

    pub fn pose_for_cell(&self, index: usize) -> Result<Pose> {
        self.check_grid()?;
        let cells = self.cell_count();
        if index >= cells {
            return Err(CellError::InvalidCellIndex { index, cells });
        }
        let row = (index / self.grid_dimension) as f64;
        let column = (index % self.grid_dimension) as f64;
        // middle of the grid, 1.0 for 3x3 and 1.5 for 4x4
        let half_span = (self.grid_dimension - 1) as f64 / 2.0;
        let x = self.center_x + (row - half_span) * self.cell_side;
        let y = self.center_y + (column - half_span) * self.cell_side;
        Ok(Pose::new(
            na::Vector3::new(x, y, self.height),
            self.orientation,
        ))
    }
}

/// Placement pose for a cell on the default 3x3 board
pub fn pose_for_cell(index: usize, center_x: f64, center_y: f64, cell_side: f64) -> Result<Pose> {
    BoardGeometry::new(center_x, center_y, cell_side).pose_for_cell(index)
}
