use crate::geom::Point;

/// Normalized pointer input, independent of mouse or touch origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragAction {
    Begin { pos: Point },
    Move { pos: Point },
    End,
}

impl DragAction {
    pub fn begin(x: f64, y: f64) -> Self {
        DragAction::Begin {
            pos: Point::new(x, y),
        }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        DragAction::Move {
            pos: Point::new(x, y),
        }
    }
}
