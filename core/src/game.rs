use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geom::{Dot, Point, Segment};

pub const CANVAS_SIZE_DEFAULT: f64 = 400.0;
pub const GRID_SPACING_DEFAULT: f64 = 100.0;
pub const DOT_RADIUS_DEFAULT: f64 = 10.0;
pub const CAPTURE_RADIUS_FACTOR_DEFAULT: f64 = 2.0;

pub const WIN_DELAY_MS_DEFAULT: u32 = 2000;
pub const WIN_MESSAGE_DEFAULT: &str = "You win";

pub const DOT_COLOR_DEFAULT: &str = "#333";
pub const LINE_COLOR_DEFAULT: &str = "#555";
pub const LINE_WIDTH_DEFAULT: f64 = 4.0;

/// First dot in creation order strictly closer than `capture_radius`.
pub fn find_nearest_dot(dots: &[Dot], pos: Point, capture_radius: f64) -> Option<Dot> {
    if !pos.is_finite() {
        return None;
    }
    dots.iter()
        .find(|dot| dot.center.distance_to(pos) < capture_radius)
        .copied()
}

/// How a drawn sequence is compared against the target shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Same length, same order, same orientation, exact coordinates.
    #[default]
    ExactSequence,
    /// Direction and order ignored; canonical segment multisets must be equal.
    Unordered,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::ExactSequence => "exact",
            MatchRule::Unordered => "unordered",
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchRule {
    type Err = MatchRuleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" | "exact_sequence" | "ordered" => Ok(MatchRule::ExactSequence),
            "unordered" | "set" => Ok(MatchRule::Unordered),
            _ => Err(MatchRuleParseError(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRuleParseError(pub String);

impl fmt::Display for MatchRuleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown match rule '{}' (expected exact or unordered)", self.0)
    }
}

impl std::error::Error for MatchRuleParseError {}

pub fn segments_match(drawn: &[Segment], target: &[Segment], rule: MatchRule) -> bool {
    if drawn.len() != target.len() {
        return false;
    }
    match rule {
        MatchRule::ExactSequence => drawn.iter().zip(target).all(|(a, b)| a == b),
        MatchRule::Unordered => canonical_sorted(drawn) == canonical_sorted(target),
    }
}

fn canonical_sorted(segments: &[Segment]) -> Vec<Segment> {
    let mut out: Vec<Segment> = segments.iter().map(Segment::canonical).collect();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}
