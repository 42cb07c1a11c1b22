use crate::catalog::TargetShape;
use crate::geom::{Dot, Segment};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { anchor: Dot },
}

impl DragState {
    pub fn anchor(&self) -> Option<Dot> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { anchor } => Some(*anchor),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WinState {
    #[default]
    Pending,
    /// Matched; notification armed but not yet delivered.
    Scheduled,
    Notified,
}

/// Session state owned by one controller for the page lifetime.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub dots: Vec<Dot>,
    pub target: TargetShape,
    pub drawn: Vec<Segment>,
    pub drag: DragState,
}

impl SessionState {
    pub fn new(dots: Vec<Dot>, target: TargetShape) -> Self {
        Self {
            dots,
            target,
            drawn: Vec::new(),
            drag: DragState::Idle,
        }
    }
}
