use crate::core::{Painter, ParameterStore, SurfaceGeometry};
use crate::host::{FrameToken, Host};
use crate::renderers::{Frame, Renderer};

/// Phase accumulator plus the single outstanding frame request of one
/// controller. Playback state lives in the controller; this only knows how to
/// schedule, advance and draw.
pub struct RenderLoop<R> {
    renderer: R,
    phase: f64,
    pending: Option<FrameToken>,
    last_ms: Option<f64>,
}

impl<R: Renderer> RenderLoop<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            phase: 0.0,
            pending: None,
            last_ms: None,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Request the next frame unless one is already outstanding.
    pub fn schedule<H: Host>(&mut self, host: &mut H) {
        if self.pending.is_none() {
            self.pending = Some(host.request_frame());
        }
    }

    /// Cancel the outstanding frame, if any. The next tick measures time
    /// from scratch.
    pub fn cancel<H: Host>(&mut self, host: &mut H) {
        if let Some(token) = self.pending.take() {
            host.cancel_frame(token);
        }
        self.last_ms = None;
    }

    /// The outstanding request has been delivered.
    pub fn fired(&mut self) {
        self.pending = None;
    }

    pub fn advance(&mut self, params: &ParameterStore, now_ms: f64) {
        let dt = match self.last_ms {
            Some(last) if now_ms.is_finite() => (now_ms - last).max(0.0),
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        self.phase += self.renderer.step(params, dt);
    }

    pub fn draw<P: Painter>(&mut self, painter: &mut P, geometry: SurfaceGeometry, params: &ParameterStore) {
        painter.begin_frame(&geometry);
        let frame = Frame {
            phase: self.phase,
            geometry,
            params,
        };
        self.renderer.draw(painter, &frame);
    }

    pub fn draw_stopped<P: Painter>(
        &mut self,
        painter: &mut P,
        geometry: SurfaceGeometry,
        params: &ParameterStore,
    ) {
        painter.begin_frame(&geometry);
        let frame = Frame {
            phase: self.phase,
            geometry,
            params,
        };
        self.renderer.draw_stopped(painter, &frame);
    }

    pub fn reset_phase(&mut self) {
        self.phase = 0.0;
    }

    pub fn reset_renderer(&mut self) {
        self.renderer.reset();
    }

    /// Tear down the current run and rebuild it from `params`.
    pub fn restart(&mut self, params: &ParameterStore) {
        self.phase = 0.0;
        self.last_ms = None;
        self.renderer.rebuild(params);
    }

    pub fn is_finished(&self, params: &ParameterStore) -> bool {
        self.renderer.is_finished(self.phase, params)
    }

    pub fn validate(&self, params: &ParameterStore) -> crate::error::FxResult<()> {
        self.renderer.validate(params)
    }

    pub fn restarts_on(&self, name: &str) -> bool {
        self.renderer.restarts_on(name)
    }
}
