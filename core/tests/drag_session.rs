use std::cell::RefCell;
use std::rc::Rc;

use dotgrid_core::{
    DragAction, DragOutcome, DragState, Dot, MatchRule, Point, PuzzleConfig, PuzzleController,
    Segment, Style, Surface, TargetShape, VirtualScheduler,
};

#[derive(Default)]
struct RecordingSurface {
    dots: Vec<(Point, f64, String)>,
    segments: Vec<(Segment, String, f64)>,
}

impl Surface for RecordingSurface {
    fn draw_dot(&mut self, dot: &Dot, radius: f64, style: &Style) {
        self.dots.push((dot.center, radius, style.dot_color.clone()));
    }

    fn draw_segment(&mut self, segment: &Segment, style: &Style) {
        self.segments
            .push((*segment, style.line_color.clone(), style.line_width));
    }
}

fn build(rule: MatchRule) -> PuzzleController<RecordingSurface, VirtualScheduler> {
    let config = PuzzleConfig {
        match_rule: rule,
        ..PuzzleConfig::default()
    };
    PuzzleController::new(
        config,
        TargetShape::default(),
        RecordingSurface::default(),
        VirtualScheduler::new(),
        Rc::new(|_: &str| {}),
    )
    .expect("controller")
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn drag_path(ctrl: &mut PuzzleController<RecordingSurface, VirtualScheduler>, path: &[(f64, f64)]) {
    let (first, rest) = path.split_first().expect("path");
    ctrl.dispatch(DragAction::begin(first.0, first.1));
    for (x, y) in rest {
        ctrl.dispatch(DragAction::move_to(*x, *y));
    }
    ctrl.dispatch(DragAction::End);
}

#[test]
fn lattice_is_drawn_with_dot_style() {
    let ctrl = build(MatchRule::ExactSequence);
    let surface = ctrl.surface();
    assert_eq!(surface.dots.len(), 9);
    for (center, radius, color) in &surface.dots {
        assert!([100.0, 200.0, 300.0].contains(&center.x));
        assert!([100.0, 200.0, 300.0].contains(&center.y));
        assert_eq!(*radius, 10.0);
        assert_eq!(color, "#333");
    }
}

#[test]
fn dragging_onto_the_anchor_records_nothing() {
    let mut ctrl = build(MatchRule::ExactSequence);
    ctrl.dispatch(DragAction::begin(100.0, 100.0));
    for offset in [0.0, 3.0, -7.0, 12.0] {
        let outcome = ctrl.dispatch(DragAction::move_to(100.0 + offset, 100.0 - offset));
        assert_eq!(outcome, DragOutcome::Ignored);
    }
    ctrl.dispatch(DragAction::End);
    assert!(ctrl.drawn_segments().is_empty());
    assert!(ctrl.surface().segments.is_empty());
}

#[test]
fn a_b_c_records_two_segments_in_order() {
    let mut ctrl = build(MatchRule::ExactSequence);
    assert!(matches!(
        ctrl.dispatch(DragAction::begin(98.0, 103.0)),
        DragOutcome::Anchored(dot) if dot.center == p(100.0, 100.0)
    ));
    // Wandering between dots resolves to nothing and is skipped.
    ctrl.dispatch(DragAction::move_to(100.0, 150.0));
    ctrl.dispatch(DragAction::move_to(101.0, 199.0));
    ctrl.dispatch(DragAction::move_to(101.0, 201.0));
    ctrl.dispatch(DragAction::move_to(200.0, 204.0));

    assert_eq!(
        ctrl.drawn_segments(),
        &[
            Segment::new(p(100.0, 100.0), p(100.0, 200.0)),
            Segment::new(p(100.0, 200.0), p(200.0, 200.0)),
        ]
    );
    let drawn: Vec<Segment> = ctrl.surface().segments.iter().map(|(s, _, _)| *s).collect();
    assert_eq!(drawn, ctrl.drawn_segments());
    for (_, color, width) in &ctrl.surface().segments {
        assert_eq!(color, "#555");
        assert_eq!(*width, 4.0);
    }
    assert_eq!(
        ctrl.drag_state().anchor().map(|dot| dot.center),
        Some(p(200.0, 200.0))
    );
}

#[test]
fn segment_outcome_reports_running_total() {
    let mut ctrl = build(MatchRule::ExactSequence);
    ctrl.dispatch(DragAction::begin(100.0, 100.0));
    let outcome = ctrl.dispatch(DragAction::move_to(100.0, 200.0));
    assert_eq!(
        outcome,
        DragOutcome::SegmentDrawn {
            segment: Segment::new(p(100.0, 100.0), p(100.0, 200.0)),
            total: 1,
            solved_now: false,
        }
    );
}

#[test]
fn release_clears_anchor_but_keeps_segments() {
    let mut ctrl = build(MatchRule::ExactSequence);
    drag_path(&mut ctrl, &[(100.0, 100.0), (100.0, 200.0), (100.0, 300.0)]);
    assert_eq!(ctrl.drag_state(), DragState::Idle);
    assert_eq!(ctrl.drawn_segments().len(), 2);

    // Moves after release do nothing until a new press lands on a dot.
    assert_eq!(ctrl.dispatch(DragAction::move_to(200.0, 300.0)), DragOutcome::Ignored);
    assert_eq!(ctrl.drawn_segments().len(), 2);
}

#[test]
fn exact_target_solves_under_exact_rule() {
    let mut ctrl = build(MatchRule::ExactSequence);
    drag_path(
        &mut ctrl,
        &[
            (100.0, 100.0),
            (100.0, 200.0),
            (100.0, 300.0),
            (200.0, 300.0),
            (300.0, 300.0),
        ],
    );
    assert!(ctrl.is_solved());
}

#[test]
fn reversed_path_depends_on_rule() {
    let reversed = [
        (300.0, 300.0),
        (200.0, 300.0),
        (100.0, 300.0),
        (100.0, 200.0),
        (100.0, 100.0),
    ];

    let mut exact = build(MatchRule::ExactSequence);
    drag_path(&mut exact, &reversed);
    assert_eq!(exact.drawn_segments().len(), 4);
    assert!(!exact.is_solved());

    let mut unordered = build(MatchRule::Unordered);
    drag_path(&mut unordered, &reversed);
    assert!(unordered.is_solved());
}

#[test]
fn reordered_strokes_depend_on_rule() {
    let strokes: [&[(f64, f64)]; 2] = [
        &[(100.0, 300.0), (200.0, 300.0), (300.0, 300.0)],
        &[(100.0, 100.0), (100.0, 200.0), (100.0, 300.0)],
    ];

    let mut exact = build(MatchRule::ExactSequence);
    let mut unordered = build(MatchRule::Unordered);
    for stroke in strokes {
        drag_path(&mut exact, stroke);
        drag_path(&mut unordered, stroke);
    }
    assert!(!exact.is_solved());
    assert!(unordered.is_solved());
}

#[test]
fn interrupted_drag_still_counts_cumulative_segments() {
    let mut ctrl = build(MatchRule::ExactSequence);
    drag_path(&mut ctrl, &[(100.0, 100.0), (100.0, 200.0), (100.0, 300.0)]);
    assert!(!ctrl.is_solved());
    drag_path(&mut ctrl, &[(100.0, 300.0), (200.0, 300.0), (300.0, 300.0)]);
    assert_eq!(ctrl.drawn_segments().len(), 4);
    assert!(ctrl.is_solved());
}

#[test]
fn non_adjacent_dots_still_form_segments() {
    let mut ctrl = build(MatchRule::ExactSequence);
    drag_path(&mut ctrl, &[(100.0, 100.0), (300.0, 300.0)]);
    assert_eq!(
        ctrl.drawn_segments(),
        &[Segment::new(p(100.0, 100.0), p(300.0, 300.0))]
    );
}

#[test]
fn wrong_segment_breaks_exact_match_for_good() {
    let mut ctrl = build(MatchRule::ExactSequence);
    drag_path(
        &mut ctrl,
        &[
            (100.0, 100.0),
            (200.0, 100.0),
            (100.0, 100.0),
            (100.0, 200.0),
            (100.0, 300.0),
            (200.0, 300.0),
            (300.0, 300.0),
        ],
    );
    assert!(!ctrl.is_solved());
}

#[test]
fn custom_target_and_spacing() {
    let config = PuzzleConfig {
        grid_spacing: 80.0,
        ..PuzzleConfig::default()
    };
    let target = TargetShape::new(
        "bar",
        "Bar",
        vec![Segment::new(p(80.0, 80.0), p(160.0, 80.0))],
    );
    let mut ctrl = PuzzleController::new(
        config,
        target,
        RecordingSurface::default(),
        VirtualScheduler::new(),
        Rc::new(|_: &str| {}),
    )
    .expect("controller");
    assert_eq!(ctrl.dots().len(), 16);
    drag_path(&mut ctrl, &[(80.0, 80.0), (160.0, 80.0)]);
    assert!(ctrl.is_solved());
}

#[test]
fn win_hook_receives_configured_message() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_hook = seen.clone();
    let scheduler = VirtualScheduler::new();
    let config = PuzzleConfig {
        win_message: "Solved!".to_string(),
        ..PuzzleConfig::default()
    };
    let mut ctrl = PuzzleController::new(
        config,
        TargetShape::default(),
        RecordingSurface::default(),
        scheduler.clone(),
        Rc::new(move |msg: &str| seen_hook.borrow_mut().push(msg.to_string())),
    )
    .expect("controller");
    drag_path(
        &mut ctrl,
        &[
            (100.0, 100.0),
            (100.0, 200.0),
            (100.0, 300.0),
            (200.0, 300.0),
            (300.0, 300.0),
        ],
    );
    scheduler.advance(5000);
    assert_eq!(*seen.borrow(), vec!["Solved!".to_string()]);
}
