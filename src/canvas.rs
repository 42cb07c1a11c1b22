use std::f64::consts::TAU;

use dotgrid_core::{Dot, Segment, Style, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub(crate) const CANVAS_ID: &str = "dotGrid";

/// Finds the puzzle canvas, creating and attaching one when the page has none.
pub(crate) fn find_or_create_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    if let Some(element) = document.get_element_by_id(CANVAS_ID) {
        return element.dyn_into::<HtmlCanvasElement>().map_err(|_| {
            JsValue::from_str("element #dotGrid is not a canvas")
        });
    }
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_id(CANVAS_ID);
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&canvas)?;
    Ok(canvas)
}

pub(crate) struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub(crate) fn new(canvas: &HtmlCanvasElement, size: f64) -> Result<Self, JsValue> {
        let side = size.round().max(1.0) as u32;
        canvas.set_width(side);
        canvas.set_height(side);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn draw_dot(&mut self, dot: &Dot, radius: f64, style: &Style) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(dot.center.x, dot.center.y, radius, 0.0, TAU)
            .is_err()
        {
            gloo::console::warn!("arc failed for dot", dot.index as u32);
            return;
        }
        self.ctx.set_fill_style_str(&style.dot_color);
        self.ctx.fill();
    }

    fn draw_segment(&mut self, segment: &Segment, style: &Style) {
        self.ctx.begin_path();
        self.ctx.move_to(segment.start.x, segment.start.y);
        self.ctx.line_to(segment.end.x, segment.end.y);
        self.ctx.set_stroke_style_str(&style.line_color);
        self.ctx.set_line_width(style.line_width);
        self.ctx.stroke();
    }
}
