use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Lexicographic order on (x, y) using IEEE total ordering.
    pub fn total_cmp(&self, other: &Point) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A lattice point. `index` is its position in creation order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub index: usize,
    pub center: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn between(start: &Dot, end: &Dot) -> Self {
        Self {
            start: start.center,
            end: end.center,
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Endpoints sorted so that `start <= end` lexicographically.
    pub fn canonical(&self) -> Self {
        if self.start.total_cmp(&self.end) == Ordering::Greater {
            self.reversed()
        } else {
            *self
        }
    }

    pub fn total_cmp(&self, other: &Segment) -> Ordering {
        self.start
            .total_cmp(&other.start)
            .then_with(|| self.end.total_cmp(&other.end))
    }
}
