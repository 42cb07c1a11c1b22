use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{
    MatchRule, CANVAS_SIZE_DEFAULT, CAPTURE_RADIUS_FACTOR_DEFAULT, DOT_COLOR_DEFAULT,
    DOT_RADIUS_DEFAULT, GRID_SPACING_DEFAULT, LINE_COLOR_DEFAULT, LINE_WIDTH_DEFAULT,
    WIN_DELAY_MS_DEFAULT, WIN_MESSAGE_DEFAULT,
};
use crate::geom::Point;

pub const LATTICE_AXIS_MAX: usize = 256;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub dot_color: String,
    pub line_color: String,
    pub line_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            dot_color: DOT_COLOR_DEFAULT.to_string(),
            line_color: LINE_COLOR_DEFAULT.to_string(),
            line_width: LINE_WIDTH_DEFAULT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub canvas_size: f64,
    pub grid_spacing: f64,
    pub dot_radius: f64,
    pub capture_radius_factor: f64,
    pub win_delay_ms: u32,
    pub win_message: String,
    pub match_rule: MatchRule,
    pub style: Style,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            canvas_size: CANVAS_SIZE_DEFAULT,
            grid_spacing: GRID_SPACING_DEFAULT,
            dot_radius: DOT_RADIUS_DEFAULT,
            capture_radius_factor: CAPTURE_RADIUS_FACTOR_DEFAULT,
            win_delay_ms: WIN_DELAY_MS_DEFAULT,
            win_message: WIN_MESSAGE_DEFAULT.to_string(),
            match_rule: MatchRule::default(),
            style: Style::default(),
        }
    }
}

impl PuzzleConfig {
    pub fn capture_radius(&self) -> f64 {
        self.dot_radius * self.capture_radius_factor
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.canvas_size.is_finite() || self.canvas_size <= 0.0 {
            return Err(ConfigError::InvalidCanvasSize(self.canvas_size));
        }
        if !self.grid_spacing.is_finite() || self.grid_spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing(self.grid_spacing));
        }
        if !self.dot_radius.is_finite() || self.dot_radius <= 0.0 {
            return Err(ConfigError::InvalidDotRadius(self.dot_radius));
        }
        if !self.capture_radius_factor.is_finite() || self.capture_radius_factor <= 0.0 {
            return Err(ConfigError::InvalidCaptureFactor(self.capture_radius_factor));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidCanvasSize(f64),
    InvalidSpacing(f64),
    InvalidDotRadius(f64),
    InvalidCaptureFactor(f64),
    LatticeTooDense { per_axis: usize, max: usize },
    EmptyLattice,
    EmptyTarget,
    DegenerateTargetSegment { index: usize },
    TargetOffLattice { index: usize, point: Point },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCanvasSize(value) => {
                write!(f, "canvas size must be positive and finite, got {value}")
            }
            ConfigError::InvalidSpacing(value) => {
                write!(f, "grid spacing must be positive and finite, got {value}")
            }
            ConfigError::InvalidDotRadius(value) => {
                write!(f, "dot radius must be positive and finite, got {value}")
            }
            ConfigError::InvalidCaptureFactor(value) => {
                write!(f, "capture radius factor must be positive and finite, got {value}")
            }
            ConfigError::LatticeTooDense { per_axis, max } => {
                write!(f, "lattice would have {per_axis} dots per axis (max {max})")
            }
            ConfigError::EmptyLattice => write!(f, "grid spacing leaves no dots inside the canvas"),
            ConfigError::EmptyTarget => write!(f, "target shape has no segments"),
            ConfigError::DegenerateTargetSegment { index } => {
                write!(f, "target segment {index} starts and ends on the same point")
            }
            ConfigError::TargetOffLattice { index, point } => {
                write!(
                    f,
                    "target segment {index} uses ({}, {}) which is not a lattice dot",
                    point.x, point.y
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
