//! Canvas 2D surface (browser only)

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::error::FieldError;
use crate::renderer::{Rgba, Surface, SurfaceSize};

/// A `<canvas>` element and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: SurfaceSize,
}

impl CanvasSurface {
    /// Look up a canvas by element id and acquire its 2D context
    pub fn from_element_id(document: &Document, id: &str) -> Result<Self, FieldError> {
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| FieldError::MissingCanvas(id.to_string()))?;
        let canvas: HtmlCanvasElement = element
            .dyn_into()
            .map_err(|_| FieldError::NotACanvas(id.to_string()))?;
        Self::new(canvas, id)
    }

    pub fn new(canvas: HtmlCanvasElement, id: &str) -> Result<Self, FieldError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| FieldError::NoContext(id.to_string()))?;
        let size = SurfaceSize::new(canvas.width(), canvas.height());
        Ok(Self { canvas, ctx, size })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        self.size = size;
    }

    fn clear(&mut self, origin: Vec2, width: f32, height: f32) {
        self.ctx
            .clear_rect(origin.x as f64, origin.y as f64, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_rect(&mut self, origin: Vec2, width: f32, height: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, width as f64, height as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}
