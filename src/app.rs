use std::cell::RefCell;
use std::rc::Rc;

use dotgrid_core::{DragOutcome, PuzzleController};
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent};

use crate::app_router::{self, InitConfig};
use crate::canvas::{find_or_create_canvas, CanvasSurface};
use crate::input::{InputEventKind, PointerInput};
use crate::runtime::{alert_hook, GlooScheduler};

type Controller = PuzzleController<CanvasSurface, GlooScheduler>;

const MOUSE_EVENTS: [&str; 3] = ["mousedown", "mousemove", "mouseup"];
const TOUCH_EVENTS: [&str; 3] = ["touchstart", "touchmove", "touchend"];

thread_local! {
    static APP: RefCell<Option<Rc<PuzzleApp>>> = RefCell::new(None);
}

pub(crate) fn run() -> Result<(), JsValue> {
    let document = gloo::utils::document();
    let canvas = find_or_create_canvas(&document)?;
    let (init, warnings) = app_router::load_init_config();
    for warning in &warnings {
        gloo::console::warn!("dotgrid: query", warning.clone());
    }
    let controller = match build_controller(&canvas, init) {
        Ok(controller) => controller,
        Err(err) => {
            gloo::console::warn!("dotgrid: falling back to defaults", err);
            build_controller(&canvas, InitConfig::default())?
        }
    };
    gloo::console::log!(format!(
        "dotgrid: ready ({} dots, shape '{}', {} match)",
        controller.dots().len(),
        controller.target().slug(),
        controller.config().match_rule
    ));
    let app = Rc::new(PuzzleApp {
        canvas,
        controller: RefCell::new(controller),
        listeners: RefCell::new(Vec::new()),
    });
    app.install_listeners();
    APP.with(|slot| {
        *slot.borrow_mut() = Some(app);
    });
    Ok(())
}

fn build_controller(canvas: &HtmlCanvasElement, init: InitConfig) -> Result<Controller, JsValue> {
    let surface = CanvasSurface::new(canvas, init.config.canvas_size)?;
    PuzzleController::new(init.config, init.target, surface, GlooScheduler, alert_hook())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

struct PuzzleApp {
    canvas: HtmlCanvasElement,
    controller: RefCell<Controller>,
    listeners: RefCell<Vec<EventListener>>,
}

impl PuzzleApp {
    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();
        for event_type in MOUSE_EVENTS {
            let app = Rc::clone(self);
            let listener = EventListener::new(&self.canvas, event_type, move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                app.handle_pointer(event.type_().as_str(), event);
            });
            listeners.push(listener);
        }
        for event_type in TOUCH_EVENTS {
            let app = Rc::clone(self);
            // Non-passive so touchmove can suppress page scrolling.
            let listener = EventListener::new_with_options(
                &self.canvas,
                event_type,
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: false,
                },
                move |event: &Event| {
                    let Some(event) = event.dyn_ref::<TouchEvent>() else {
                        return;
                    };
                    let event_type = event.type_();
                    if event_type == "touchmove" {
                        event.prevent_default();
                    }
                    app.handle_pointer(event_type.as_str(), event);
                },
            );
            listeners.push(listener);
        }
        *self.listeners.borrow_mut() = listeners;
    }

    fn handle_pointer(&self, event_type: &str, event: &impl PointerInput) {
        let Some(kind) = InputEventKind::from_event_type(event_type) else {
            return;
        };
        let pos = match kind {
            InputEventKind::Up => None,
            InputEventKind::Down | InputEventKind::Move => event.position(&self.canvas),
        };
        let Some(action) = kind.to_action(pos) else {
            return;
        };
        let outcome = self.controller.borrow_mut().dispatch(action);
        match outcome {
            DragOutcome::Anchored(dot) => {
                gloo::console::debug!(format!(
                    "dotgrid: {:?} anchored at ({}, {})",
                    event.kind(),
                    dot.center.x,
                    dot.center.y
                ));
            }
            DragOutcome::SegmentDrawn {
                segment,
                total,
                solved_now,
            } => {
                gloo::console::log!(format!(
                    "dotgrid: segment #{total} ({}, {}) -> ({}, {})",
                    segment.start.x, segment.start.y, segment.end.x, segment.end.y
                ));
                if solved_now {
                    let delay = self.controller.borrow().config().win_delay_ms;
                    gloo::console::log!(format!("dotgrid: target matched, notifying in {delay}ms"));
                }
            }
            DragOutcome::Released { .. } | DragOutcome::Ignored => {}
        }
    }
}
