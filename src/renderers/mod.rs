use crate::core::{Painter, ParamSpec, ParameterStore, SurfaceGeometry};
use crate::error::FxResult;

pub mod crt;
pub mod indicator;
pub mod wave;

pub use crt::CrtReveal;
pub use indicator::SteppedIndicator;
pub use wave::StandingWave;

/// Everything a draw call may read. Drawing is a pure function of these.
pub struct Frame<'a> {
    pub phase: f64,
    pub geometry: SurfaceGeometry,
    pub params: &'a ParameterStore,
}

/// A draw algorithm plugged into the render loop.
pub trait Renderer {
    fn name(&self) -> &'static str;
    fn schema(&self) -> &'static [ParamSpec];
    /// Reject configurations that must not animate.
    fn validate(&self, params: &ParameterStore) -> FxResult<()>;
    /// Phase increment for one frame, given wall time since the previous one.
    fn step(&self, params: &ParameterStore, dt_ms: f64) -> f64;
    fn draw<P: Painter>(&mut self, painter: &mut P, frame: &Frame<'_>);

    /// Neutral visual shown while the controller is stopped.
    fn draw_stopped<P: Painter>(&mut self, _painter: &mut P, _frame: &Frame<'_>) {}

    /// Drop any per-run visual state.
    fn reset(&mut self) {}

    /// Whether a change to `name` requires tearing down and rebuilding the run.
    fn restarts_on(&self, _name: &str) -> bool {
        false
    }

    /// Rebuild per-run state from the current parameters.
    fn rebuild(&mut self, _params: &ParameterStore) {}

    fn is_finished(&self, _phase: f64, _params: &ParameterStore) -> bool {
        false
    }
}

/// Shared check for numeric parameters that must be finite and positive.
pub(crate) fn positive_finite(params: &ParameterStore, name: &str) -> FxResult<f64> {
    let v = params.number(name);
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(crate::error::FxError::InvalidConfiguration(format!(
            "`{}` must be positive and finite, got {}",
            name, v
        )))
    }
}

pub(crate) fn finite(params: &ParameterStore, name: &str) -> FxResult<f64> {
    let v = params.number(name);
    if v.is_finite() {
        Ok(v)
    } else {
        Err(crate::error::FxError::InvalidConfiguration(format!(
            "`{}` must be finite, got {}",
            name, v
        )))
    }
}
