use crate::constants::SURFACE_MARKER_ATTR;
use crate::core::{ContentBox, Painter, SurfaceGeometry};
use crate::error::{FxError, FxResult};
use crate::host::{FrameToken, Host};
use glam::DVec2;
use std::f64::consts::TAU;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// 2D canvas surface created under a container.
pub struct CanvasPainter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Painter for CanvasPainter {
    fn buffer_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_buffer_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn begin_frame(&mut self, geometry: &SurfaceGeometry) {
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let (w, h) = self.buffer_size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        _ = self.ctx.scale(geometry.scale, geometry.scale);
        self.ctx.set_global_alpha(1.0);
    }

    #[allow(deprecated)]
    fn stroke_polyline(&mut self, points: &[DVec2], width: f64, color: &str) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.set_line_width(width);
        self.ctx.set_line_join("round");
        self.ctx.set_line_cap("round");
        self.ctx.set_stroke_style(&JsValue::from_str(color));
        self.ctx.stroke();
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &str) {
        self.ctx.begin_path();
        _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.fill();
    }

    #[allow(deprecated)]
    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.fill_rect(origin.x, origin.y, size.x, size.y);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0));
    }
}

/// Browser collaborators for one container: element lookup, canvas
/// creation, `requestAnimationFrame` and a `ResizeObserver`.
pub struct DomHost {
    selector: String,
    window: web::Window,
    document: web::Document,
    container: web::Element,
    on_frame: Closure<dyn FnMut()>,
    on_resize: Closure<dyn FnMut(js_sys::Array)>,
    observer: Option<web::ResizeObserver>,
}

impl DomHost {
    pub fn query(
        selector: &str,
        on_frame: Closure<dyn FnMut()>,
        on_resize: Closure<dyn FnMut(js_sys::Array)>,
    ) -> FxResult<Self> {
        let window = web::window().ok_or_else(|| FxError::MissingElement("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| FxError::MissingElement("document".into()))?;
        let container = document
            .query_selector(selector)
            .ok()
            .flatten()
            .ok_or_else(|| FxError::MissingElement(selector.to_string()))?;
        Ok(Self {
            selector: selector.to_string(),
            window,
            document,
            container,
            on_frame,
            on_resize,
            observer: None,
        })
    }

    fn padding(style: &web::CssStyleDeclaration, property: &str) -> f64 {
        style
            .get_property_value(property)
            .ok()
            .and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}

impl Host for DomHost {
    type Surface = CanvasPainter;

    fn describe(&self) -> String {
        self.selector.clone()
    }

    fn content_box(&self) -> Option<ContentBox> {
        if !self.container.is_connected() {
            return None;
        }
        let mut width = self.container.client_width() as f64;
        let mut height = self.container.client_height() as f64;
        if let Ok(Some(style)) = self.window.get_computed_style(&self.container) {
            width -= Self::padding(&style, "padding-left") + Self::padding(&style, "padding-right");
            height -= Self::padding(&style, "padding-top") + Self::padding(&style, "padding-bottom");
        }
        Some(ContentBox::new(width.max(0.0), height.max(0.0)))
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn surface_exists(&self) -> bool {
        self.container
            .query_selector(&format!("canvas[{}]", SURFACE_MARKER_ATTR))
            .ok()
            .flatten()
            .is_some()
    }

    fn create_surface(&mut self) -> FxResult<CanvasPainter> {
        let fail = |what: &str| FxError::SurfaceAcquisitionFailure(format!("{} ({})", what, self.selector));
        let canvas = self
            .document
            .create_element("canvas")
            .map_err(|_| fail("could not create canvas"))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|_| fail("created element is not a canvas"))?;
        _ = canvas.set_attribute(SURFACE_MARKER_ATTR, "");
        _ = canvas.set_attribute("style", "display:block;width:100%;height:100%");
        self.container
            .append_child(&canvas)
            .map_err(|_| fail("could not append canvas"))?;

        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => obj.dyn_into::<web::CanvasRenderingContext2d>().ok(),
            _ => None,
        };
        match ctx {
            Some(ctx) => Ok(CanvasPainter { canvas, ctx }),
            None => {
                canvas.remove();
                Err(fail("no 2d context"))
            }
        }
    }

    fn release_surface(&mut self, surface: CanvasPainter) {
        surface.canvas.remove();
    }

    fn request_frame(&mut self) -> FrameToken {
        match self
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
        {
            Ok(id) => FrameToken(id),
            Err(e) => {
                log::error!("[dom] requestAnimationFrame failed: {:?}", e);
                FrameToken(0)
            }
        }
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        _ = self.window.cancel_animation_frame(token.0);
    }

    fn observe_resize(&mut self) {
        if self.observer.is_some() {
            return;
        }
        match web::ResizeObserver::new(self.on_resize.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&self.container);
                self.observer = Some(observer);
            }
            Err(e) => log::warn!("[dom] ResizeObserver unavailable for {}: {:?}", self.selector, e),
        }
    }

    fn unobserve_resize(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        self.unobserve_resize();
    }
}
