
use crate::canvas::{Canvas2d, Stroke, Viewport};
use crate::host::{HostError, Surface};
use crate::palette::Rgb;
use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub const CANVAS_ID: &str = "particle-background";

const CANVAS_STYLE: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("z-index", "-1"),
    ("pointer-events", "none"),
];

/// Full-page `<canvas>` drawn behind the document content.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Create the canvas and insert it as the first child of `<body>`.
    pub fn create(document: &Document) -> Result<Self, HostError> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(surface_err)?
            .dyn_into()
            .map_err(|_| HostError::Surface("created element is not a canvas".into()))?;
        canvas.set_id(CANVAS_ID);

        let style = canvas.style();
        for (property, value) in CANVAS_STYLE {
            style.set_property(property, value).map_err(surface_err)?;
        }

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(surface_err)?
            .ok_or_else(|| HostError::Surface("2D context not supported".into()))?
            .dyn_into()
            .map_err(|_| HostError::Surface("unexpected 2D context type".into()))?;

        let body = document.body().ok_or(HostError::Unavailable("document body"))?;
        body.insert_before(&canvas, body.first_child().as_ref())
            .map_err(surface_err)?;

        Ok(Self { canvas, ctx })
    }

    /// Remove the canvas from the page; no-op if it has no parent.
    pub fn detach(&self) {
        if let Some(parent) = self.canvas.parent_node() {
            if let Err(e) = parent.remove_child(&self.canvas) {
                log::warn!("failed to remove particle canvas: {}", describe(&e));
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn set_size(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
    }
}

impl Canvas2d for CanvasSurface {
    fn clear(&mut self, size: Viewport) {
        self.ctx
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.begin_path();
        // a rejected arc skips this particle, the frame goes on
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.ctx
            .set_stroke_style_str(&stroke.color.css_alpha(stroke.alpha));
        self.ctx.set_line_width(stroke.width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}

pub fn describe(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

fn surface_err(e: JsValue) -> HostError {
    HostError::Surface(describe(&e))
}
