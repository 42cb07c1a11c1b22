use dotgrid_core::{DragAction, Point};
use web_sys::{DomRect, HtmlCanvasElement, MouseEvent, Touch, TouchEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputEventKind {
    Down,
    Move,
    Up,
}

impl InputEventKind {
    pub(crate) fn from_event_type(value: &str) -> Option<Self> {
        match value {
            "mousedown" | "touchstart" => Some(InputEventKind::Down),
            "mousemove" | "touchmove" => Some(InputEventKind::Move),
            "mouseup" | "touchend" => Some(InputEventKind::Up),
            _ => None,
        }
    }

    /// Release never needs a position; press and move without one are dropped.
    pub(crate) fn to_action(self, pos: Option<Point>) -> Option<DragAction> {
        match self {
            InputEventKind::Down => pos.map(|pos| DragAction::Begin { pos }),
            InputEventKind::Move => pos.map(|pos| DragAction::Move { pos }),
            InputEventKind::Up => Some(DragAction::End),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<DomRect> for ClientRect {
    fn from(rect: DomRect) -> Self {
        Self {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> ClientRect;
    /// Size of the drawing buffer the rect is displayed at.
    fn logical_size(&self) -> (f64, f64);
}

impl HasClientRect for HtmlCanvasElement {
    fn client_rect(&self) -> ClientRect {
        self.get_bounding_client_rect().into()
    }

    fn logical_size(&self) -> (f64, f64) {
        (self.width() as f64, self.height() as f64)
    }
}

/// Maps client (viewport) coordinates into the canvas drawing buffer,
/// compensating for CSS scaling of the element.
pub(crate) fn client_to_canvas(
    client_x: f64,
    client_y: f64,
    rect: ClientRect,
    logical: (f64, f64),
) -> Option<Point> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let x = (client_x - rect.left) * logical.0 / rect.width;
    let y = (client_y - rect.top) * logical.1 / rect.height;
    let point = Point::new(x, y);
    point.is_finite().then_some(point)
}

/// Single position accessor over mouse and touch events.
pub(crate) trait PointerInput {
    fn kind(&self) -> PointerKind;
    fn client_position(&self) -> Option<(f64, f64)>;

    fn position(&self, element: &impl HasClientRect) -> Option<Point> {
        let (client_x, client_y) = self.client_position()?;
        client_to_canvas(
            client_x,
            client_y,
            element.client_rect(),
            element.logical_size(),
        )
    }
}

impl PointerInput for MouseEvent {
    fn kind(&self) -> PointerKind {
        PointerKind::Mouse
    }

    fn client_position(&self) -> Option<(f64, f64)> {
        Some((self.client_x() as f64, self.client_y() as f64))
    }
}

impl PointerInput for TouchEvent {
    fn kind(&self) -> PointerKind {
        PointerKind::Touch
    }

    fn client_position(&self) -> Option<(f64, f64)> {
        let touch = first_touch(self)?;
        Some((touch.client_x() as f64, touch.client_y() as f64))
    }
}

fn first_touch(event: &TouchEvent) -> Option<Touch> {
    event
        .touches()
        .item(0)
        .or_else(|| event.changed_touches().item(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: ClientRect = ClientRect {
        left: 10.0,
        top: 20.0,
        width: 400.0,
        height: 400.0,
    };

    #[test]
    fn client_coords_offset_by_rect() {
        let point = client_to_canvas(110.0, 220.0, RECT, (400.0, 400.0)).expect("point");
        assert_eq!(point, Point::new(100.0, 200.0));
    }

    #[test]
    fn css_scaling_is_undone() {
        let rect = ClientRect {
            width: 200.0,
            height: 200.0,
            ..RECT
        };
        let point = client_to_canvas(60.0, 70.0, rect, (400.0, 400.0)).expect("point");
        assert_eq!(point, Point::new(100.0, 100.0));
    }

    #[test]
    fn collapsed_rect_yields_nothing() {
        let rect = ClientRect {
            width: 0.0,
            ..RECT
        };
        assert_eq!(client_to_canvas(60.0, 70.0, rect, (400.0, 400.0)), None);
    }

    #[test]
    fn release_maps_without_position() {
        assert_eq!(InputEventKind::Up.to_action(None), Some(DragAction::End));
        assert_eq!(InputEventKind::Down.to_action(None), None);
        assert_eq!(InputEventKind::Move.to_action(None), None);
        assert_eq!(
            InputEventKind::Move.to_action(Some(Point::new(1.0, 2.0))),
            Some(DragAction::move_to(1.0, 2.0))
        );
    }

    #[test]
    fn event_types_cover_mouse_and_touch() {
        assert_eq!(InputEventKind::from_event_type("touchstart"), Some(InputEventKind::Down));
        assert_eq!(InputEventKind::from_event_type("mousemove"), Some(InputEventKind::Move));
        assert_eq!(InputEventKind::from_event_type("touchend"), Some(InputEventKind::Up));
        assert_eq!(InputEventKind::from_event_type("wheel"), None);
    }
}
