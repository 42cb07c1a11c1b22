use std::fmt;

use dotgrid_core::DragAction;

pub const RELEASE_TOKEN: &str = "|";

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptError {
    Empty,
    InvalidPoint { token: String, index: usize },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Empty => write!(f, "drag path has no points"),
            ScriptError::InvalidPoint { token, index } => {
                write!(f, "token {index} '{token}' is not an x,y pair")
            }
        }
    }
}

impl std::error::Error for ScriptError {}

/// Parses `"x,y x,y | x,y ..."` into press, moves and releases.
///
/// The first point of each stroke is a press, later points are moves, and
/// every stroke ends with a release.
pub fn parse_drag_script(raw: &str) -> Result<Vec<DragAction>, ScriptError> {
    let mut actions = Vec::new();
    let mut in_stroke = false;
    for (index, token) in raw.split_whitespace().enumerate() {
        if token == RELEASE_TOKEN {
            if in_stroke {
                actions.push(DragAction::End);
                in_stroke = false;
            }
            continue;
        }
        let (x, y) = parse_point(token).ok_or_else(|| ScriptError::InvalidPoint {
            token: token.to_string(),
            index,
        })?;
        if in_stroke {
            actions.push(DragAction::move_to(x, y));
        } else {
            actions.push(DragAction::begin(x, y));
            in_stroke = true;
        }
    }
    if actions.is_empty() {
        return Err(ScriptError::Empty);
    }
    if in_stroke {
        actions.push(DragAction::End);
    }
    Ok(actions)
}

fn parse_point(token: &str) -> Option<(f64, f64)> {
    let (x, y) = token.split_once(',')?;
    let x = x.trim().parse::<f64>().ok()?;
    let y = y.trim().parse::<f64>().ok()?;
    Some((x, y))
}
