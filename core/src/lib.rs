pub mod action;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod game;
pub mod geom;
pub mod grid;
pub mod state;
pub mod timer;

pub use action::DragAction;
pub use catalog::{
    default_shape, shape_by_slug, ShapeCatalogEntry, TargetShape, UnknownShape,
    DEFAULT_SHAPE_SLUG, SHAPE_CATALOG,
};
pub use config::{ConfigError, PuzzleConfig, Style};
pub use controller::{DragOutcome, PuzzleController, Surface, WinHook};
pub use game::{find_nearest_dot, segments_match, MatchRule, MatchRuleParseError};
pub use geom::{Dot, Point, Segment};
pub use grid::{create_lattice, dot_at};
pub use state::{DragState, SessionState, WinState};
pub use timer::{DeferredTask, Scheduler, VirtualScheduler};
