//! 2D canvas drawing surface

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::error::SetupError;
use crate::platform::{Rgba, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Binds the canvas with the given id and sizes it. A page without the
    /// canvas yields `None`; a canvas without a 2D context is an error.
    pub fn bind(
        document: &Document,
        id: &'static str,
        width: f32,
        height: f32,
    ) -> Result<Option<Self>, SetupError> {
        let Some(canvas) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("canvas #{id} not found, effect disabled");
            return Ok(None);
        };

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(SetupError::NoContext(id))?
            .dyn_into()
            .map_err(|_| SetupError::NoContext(id))?;

        let mut surface = Self { canvas, ctx };
        surface.resize(width, height);
        Ok(Some(surface))
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fade(&mut self, color: Rgba) {
        let (w, h) = self.size();
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(x as f64, y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_global_alpha(color.a.clamp(0.0, 1.0) as f64);
        self.ctx.set_fill_style_str(&color.with_alpha(1.0).css());
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }
}
