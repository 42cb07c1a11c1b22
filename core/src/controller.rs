use std::cell::Cell;
use std::rc::Rc;

use crate::action::DragAction;
use crate::catalog::TargetShape;
use crate::config::{ConfigError, PuzzleConfig, Style};
use crate::game::{find_nearest_dot, segments_match};
use crate::geom::{Dot, Point, Segment};
use crate::grid::{create_lattice, dot_at};
use crate::state::{DragState, SessionState, WinState};
use crate::timer::Scheduler;

/// Drawing target for dots and recorded segments.
pub trait Surface {
    fn draw_dot(&mut self, dot: &Dot, radius: f64, style: &Style);
    fn draw_segment(&mut self, segment: &Segment, style: &Style);
}

pub type WinHook = Rc<dyn Fn(&str)>;

#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    /// Nothing resolved or nothing to do.
    Ignored,
    Anchored(Dot),
    SegmentDrawn {
        segment: Segment,
        total: usize,
        /// True only on the move that first completed the target.
        solved_now: bool,
    },
    Released { was_dragging: bool },
}

pub struct PuzzleController<S: Surface, T: Scheduler> {
    config: PuzzleConfig,
    session: SessionState,
    surface: S,
    scheduler: T,
    on_win: WinHook,
    win: Rc<Cell<WinState>>,
}

impl<S: Surface, T: Scheduler> PuzzleController<S, T> {
    /// Builds the lattice, checks the target against it and draws every dot.
    pub fn new(
        config: PuzzleConfig,
        target: TargetShape,
        surface: S,
        scheduler: T,
        on_win: WinHook,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let dots = create_lattice(config.grid_spacing, config.canvas_size)?;
        if dots.is_empty() {
            return Err(ConfigError::EmptyLattice);
        }
        validate_target(&dots, &target)?;
        let mut controller = Self {
            config,
            session: SessionState::new(dots, target),
            surface,
            scheduler,
            on_win,
            win: Rc::new(Cell::new(WinState::Pending)),
        };
        controller.draw_lattice();
        Ok(controller)
    }

    fn draw_lattice(&mut self) {
        for dot in &self.session.dots {
            self.surface
                .draw_dot(dot, self.config.dot_radius, &self.config.style);
        }
    }

    pub fn dispatch(&mut self, action: DragAction) -> DragOutcome {
        match action {
            DragAction::Begin { pos } => self.begin_drag(pos),
            DragAction::Move { pos } => self.drag_move(pos),
            DragAction::End => self.end_drag(),
        }
    }

    pub fn begin_drag(&mut self, pos: Point) -> DragOutcome {
        match self.resolve(pos) {
            Some(dot) => {
                self.session.drag = DragState::Dragging { anchor: dot };
                DragOutcome::Anchored(dot)
            }
            None => DragOutcome::Ignored,
        }
    }

    pub fn drag_move(&mut self, pos: Point) -> DragOutcome {
        let Some(anchor) = self.session.drag.anchor() else {
            return DragOutcome::Ignored;
        };
        let Some(next) = self.resolve(pos) else {
            return DragOutcome::Ignored;
        };
        if next.index == anchor.index {
            return DragOutcome::Ignored;
        }
        let segment = Segment::between(&anchor, &next);
        self.surface.draw_segment(&segment, &self.config.style);
        self.session.drawn.push(segment);
        self.session.drag = DragState::Dragging { anchor: next };
        let solved_now = self.evaluate_win();
        DragOutcome::SegmentDrawn {
            segment,
            total: self.session.drawn.len(),
            solved_now,
        }
    }

    pub fn end_drag(&mut self) -> DragOutcome {
        let was_dragging = self.session.drag.is_dragging();
        self.session.drag = DragState::Idle;
        DragOutcome::Released { was_dragging }
    }

    fn resolve(&self, pos: Point) -> Option<Dot> {
        find_nearest_dot(&self.session.dots, pos, self.config.capture_radius())
    }

    /// Arms the deferred notification on the first match only.
    fn evaluate_win(&mut self) -> bool {
        if self.win.get() != WinState::Pending {
            return false;
        }
        let matched = segments_match(
            &self.session.drawn,
            self.session.target.segments(),
            self.config.match_rule,
        );
        if !matched {
            return false;
        }
        self.win.set(WinState::Scheduled);
        let win = Rc::clone(&self.win);
        let on_win = Rc::clone(&self.on_win);
        let message = self.config.win_message.clone();
        self.scheduler.schedule_once(
            self.config.win_delay_ms,
            Box::new(move || {
                if win.get() == WinState::Scheduled {
                    win.set(WinState::Notified);
                    on_win(&message);
                }
            }),
        );
        true
    }

    pub fn is_solved(&self) -> bool {
        self.win.get() != WinState::Pending
    }

    pub fn has_notified(&self) -> bool {
        self.win.get() == WinState::Notified
    }

    pub fn win_state(&self) -> WinState {
        self.win.get()
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn dots(&self) -> &[Dot] {
        &self.session.dots
    }

    pub fn target(&self) -> &TargetShape {
        &self.session.target
    }

    pub fn drawn_segments(&self) -> &[Segment] {
        &self.session.drawn
    }

    pub fn drag_state(&self) -> DragState {
        self.session.drag
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }
}

fn validate_target(dots: &[Dot], target: &TargetShape) -> Result<(), ConfigError> {
    if target.is_empty() {
        return Err(ConfigError::EmptyTarget);
    }
    for (index, segment) in target.segments().iter().enumerate() {
        if segment.is_degenerate() {
            return Err(ConfigError::DegenerateTargetSegment { index });
        }
        for point in [segment.start, segment.end] {
            if dot_at(dots, point).is_none() {
                return Err(ConfigError::TargetOffLattice { index, point });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::VirtualScheduler;

    #[derive(Default)]
    struct NullSurface {
        dots: usize,
        segments: usize,
    }

    impl Surface for NullSurface {
        fn draw_dot(&mut self, _dot: &Dot, _radius: f64, _style: &Style) {
            self.dots += 1;
        }

        fn draw_segment(&mut self, _segment: &Segment, _style: &Style) {
            self.segments += 1;
        }
    }

    fn controller() -> PuzzleController<NullSurface, VirtualScheduler> {
        PuzzleController::new(
            PuzzleConfig::default(),
            TargetShape::default(),
            NullSurface::default(),
            VirtualScheduler::new(),
            Rc::new(|_: &str| {}),
        )
        .expect("controller")
    }

    #[test]
    fn construction_draws_every_dot() {
        let ctrl = controller();
        assert_eq!(ctrl.surface().dots, 9);
        assert_eq!(ctrl.surface().segments, 0);
        assert_eq!(ctrl.drag_state(), DragState::Idle);
    }

    #[test]
    fn begin_off_lattice_stays_idle() {
        let mut ctrl = controller();
        assert_eq!(ctrl.begin_drag(Point::new(150.0, 150.0)), DragOutcome::Ignored);
        assert_eq!(ctrl.drag_state(), DragState::Idle);
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut ctrl = controller();
        assert_eq!(ctrl.drag_move(Point::new(100.0, 200.0)), DragOutcome::Ignored);
        assert!(ctrl.drawn_segments().is_empty());
    }

    #[test]
    fn move_to_same_or_no_dot_keeps_anchor() {
        let mut ctrl = controller();
        ctrl.begin_drag(Point::new(100.0, 100.0));
        assert_eq!(ctrl.drag_move(Point::new(105.0, 95.0)), DragOutcome::Ignored);
        assert_eq!(ctrl.drag_move(Point::new(150.0, 150.0)), DragOutcome::Ignored);
        assert_eq!(
            ctrl.drag_state().anchor().map(|dot| dot.center),
            Some(Point::new(100.0, 100.0))
        );
        assert_eq!(ctrl.surface().segments, 0);
    }

    #[test]
    fn end_from_idle_is_harmless() {
        let mut ctrl = controller();
        assert_eq!(ctrl.end_drag(), DragOutcome::Released { was_dragging: false });
    }

    #[test]
    fn rejects_target_off_lattice() {
        let target = TargetShape::new(
            "bad",
            "Bad",
            vec![Segment::new(Point::new(100.0, 100.0), Point::new(150.0, 100.0))],
        );
        let err = PuzzleController::new(
            PuzzleConfig::default(),
            target,
            NullSurface::default(),
            VirtualScheduler::new(),
            Rc::new(|_: &str| {}),
        )
        .err();
        assert_eq!(
            err,
            Some(ConfigError::TargetOffLattice {
                index: 0,
                point: Point::new(150.0, 100.0)
            })
        );
    }

    #[test]
    fn rejects_empty_and_degenerate_targets() {
        let build = |target: TargetShape| {
            PuzzleController::new(
                PuzzleConfig::default(),
                target,
                NullSurface::default(),
                VirtualScheduler::new(),
                Rc::new(|_: &str| {}),
            )
            .err()
        };
        assert_eq!(
            build(TargetShape::new("empty", "Empty", Vec::new())),
            Some(ConfigError::EmptyTarget)
        );
        let point = Point::new(200.0, 200.0);
        assert_eq!(
            build(TargetShape::new("dot", "Dot", vec![Segment::new(point, point)])),
            Some(ConfigError::DegenerateTargetSegment { index: 0 })
        );
    }

    #[test]
    fn rejects_spacing_without_dots() {
        let config = PuzzleConfig {
            grid_spacing: 400.0,
            ..PuzzleConfig::default()
        };
        let err = PuzzleController::new(
            config,
            TargetShape::default(),
            NullSurface::default(),
            VirtualScheduler::new(),
            Rc::new(|_: &str| {}),
        )
        .err();
        assert_eq!(err, Some(ConfigError::EmptyLattice));
    }
}
