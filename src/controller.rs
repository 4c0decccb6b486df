use crate::core::{Attach, ParamValue, ParameterSet, ParameterStore, SurfaceGeometry, SurfaceManager};
use crate::error::{FxError, FxResult};
use crate::frame::RenderLoop;
use crate::host::Host;
use crate::renderers::Renderer;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Full lifecycle of a controller. `Paused`, `Playing` and `Stopped` are the
/// ready states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Paused,
    Playing,
    Stopped,
    Destroyed,
}

impl ControllerState {
    pub fn playback(self) -> Option<PlaybackState> {
        match self {
            ControllerState::Paused => Some(PlaybackState::Paused),
            ControllerState::Playing => Some(PlaybackState::Playing),
            ControllerState::Stopped => Some(PlaybackState::Stopped),
            ControllerState::Uninitialized | ControllerState::Destroyed => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ControllerState::Uninitialized => "uninitialized",
            ControllerState::Paused => "paused",
            ControllerState::Playing => "playing",
            ControllerState::Stopped => "stopped",
            ControllerState::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One animated canvas: owns its parameters, surface and render loop, and is
/// the only place playback state changes.
pub struct Controller<H: Host, R> {
    host: H,
    params: ParameterStore,
    surface: SurfaceManager<H::Surface>,
    frames: RenderLoop<R>,
    state: ControllerState,
    play_requested: bool,
}

impl<H: Host, R: Renderer> Controller<H, R> {
    /// Create the surface under the host's container. A container with no
    /// area yet is not an error: initialization is retried on the next frame
    /// or resize.
    pub fn attach(mut host: H, renderer: R, params: ParameterStore, autoplay: bool) -> FxResult<Self> {
        let mut surface = SurfaceManager::new();
        let outcome = surface.attach(&mut host).map_err(|e| {
            log::warn!("[{}] not attached: {}", renderer.name(), e);
            e
        })?;
        host.observe_resize();
        let mut controller = Self {
            host,
            params,
            surface,
            frames: RenderLoop::new(renderer),
            state: ControllerState::Uninitialized,
            play_requested: autoplay,
        };
        match outcome {
            Attach::Ready => controller.become_ready(),
            Attach::Deferred => controller.frames.schedule(&mut controller.host),
        }
        Ok(controller)
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn playback(&self) -> Option<PlaybackState> {
        self.state.playback()
    }

    pub fn phase(&self) -> f64 {
        self.frames.phase()
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    pub fn geometry(&self) -> Option<SurfaceGeometry> {
        self.surface.geometry()
    }

    pub fn renderer(&self) -> &R {
        self.frames.renderer()
    }

    pub fn painter(&self) -> Option<&H::Surface> {
        self.surface.painter()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn play(&mut self) -> FxResult<()> {
        match self.state {
            ControllerState::Destroyed => Err(self.destroyed("play")),
            ControllerState::Playing => Ok(()),
            ControllerState::Uninitialized => {
                self.play_requested = true;
                Ok(())
            }
            ControllerState::Stopped => {
                let e = FxError::InvalidConfiguration(
                    "stopped on invalid configuration; update it before playing".into(),
                );
                log::warn!("[{}] {}", self.name(), e);
                Err(e)
            }
            ControllerState::Paused => {
                if let Err(e) = self.frames.validate(&self.params) {
                    log::warn!("[{}] {}", self.name(), e);
                    self.enter_stopped();
                    return Err(e);
                }
                self.start();
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) -> FxResult<()> {
        match self.state {
            ControllerState::Destroyed => Err(self.destroyed("pause")),
            ControllerState::Playing => {
                self.frames.cancel(&mut self.host);
                self.state = ControllerState::Paused;
                Ok(())
            }
            ControllerState::Uninitialized => {
                self.play_requested = false;
                Ok(())
            }
            ControllerState::Paused | ControllerState::Stopped => Ok(()),
        }
    }

    /// Zero the phase. While paused the reset is drawn immediately.
    pub fn reset_phase(&mut self) -> FxResult<()> {
        if self.state == ControllerState::Destroyed {
            return Err(self.destroyed("resetPhase"));
        }
        self.frames.reset_phase();
        if self.state == ControllerState::Paused {
            self.redraw();
        }
        Ok(())
    }

    pub fn update_parameter(&mut self, name: &str, value: impl Into<ParamValue>) -> FxResult<()> {
        if self.state == ControllerState::Destroyed {
            return Err(self.destroyed("updateParameter"));
        }
        let before = self.params.snapshot();
        self.params.set(name, value.into())?;
        self.reconfigure(&before)
    }

    pub fn set_mode(&mut self, mode: &str) -> FxResult<()> {
        if self.state == ControllerState::Destroyed {
            return Err(self.destroyed("setMode"));
        }
        let before = self.params.snapshot();
        self.params.apply_mode(mode)?;
        log::debug!("[{}] mode `{}`", self.name(), mode);
        self.reconfigure(&before)
    }

    /// Resize notification from the host. Paused and stopped visuals are
    /// redrawn at once; a playing loop picks the new size up on its next frame.
    pub fn on_resize(&mut self) {
        match self.state {
            ControllerState::Destroyed => {}
            ControllerState::Uninitialized => self.retry_attach(),
            ControllerState::Playing => {
                self.surface.resize(&self.host);
            }
            ControllerState::Paused | ControllerState::Stopped => {
                self.surface.resize(&self.host);
                self.redraw();
            }
        }
    }

    /// Per-frame callback from the host's scheduler.
    pub fn on_frame(&mut self, now_ms: f64) {
        self.frames.fired();
        match self.state {
            ControllerState::Uninitialized => self.retry_attach(),
            ControllerState::Playing => {
                self.frames.advance(&self.params, now_ms);
                self.redraw();
                if self.frames.is_finished(&self.params) {
                    log::debug!("[{}] finished", self.name());
                    self.frames.cancel(&mut self.host);
                    self.state = ControllerState::Paused;
                } else {
                    self.frames.schedule(&mut self.host);
                }
            }
            // Stale callback after pause/stop/destroy.
            _ => {}
        }
    }

    /// Release the surface and detach from the host. Every later call is a
    /// no-op reporting `Destroyed`.
    pub fn destroy(&mut self) -> FxResult<()> {
        if self.state == ControllerState::Destroyed {
            return Err(self.destroyed("destroy"));
        }
        self.teardown();
        log::info!("[{}] destroyed {}", self.name(), self.host.describe());
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.frames.renderer().name()
    }

    fn destroyed(&self, op: &str) -> FxError {
        log::warn!("[{}] {} called after destroy", self.name(), op);
        FxError::Destroyed
    }

    fn teardown(&mut self) {
        self.frames.cancel(&mut self.host);
        self.host.unobserve_resize();
        self.surface.release(&mut self.host);
        self.state = ControllerState::Destroyed;
    }

    fn start(&mut self) {
        if self.frames.is_finished(&self.params) {
            self.frames.reset_phase();
        }
        self.state = ControllerState::Playing;
        self.frames.schedule(&mut self.host);
    }

    fn become_ready(&mut self) {
        self.frames.cancel(&mut self.host);
        self.frames.restart(&self.params);
        if let Err(e) = self.frames.validate(&self.params) {
            log::warn!("[{}] {}", self.name(), e);
            self.enter_stopped();
            return;
        }
        self.state = ControllerState::Paused;
        log::info!("[{}] ready under {}", self.name(), self.host.describe());
        self.redraw();
        if std::mem::take(&mut self.play_requested) {
            self.start();
        }
    }

    fn retry_attach(&mut self) {
        match self.surface.attach(&mut self.host) {
            Ok(Attach::Ready) => self.become_ready(),
            Ok(Attach::Deferred) => self.frames.schedule(&mut self.host),
            Err(e) => {
                log::warn!("[{}] giving up on initialization: {}", self.name(), e);
                self.teardown();
            }
        }
    }

    fn enter_stopped(&mut self) {
        self.frames.cancel(&mut self.host);
        self.frames.reset_renderer();
        self.state = ControllerState::Stopped;
        self.redraw();
    }

    /// Apply the consequences of a parameter change made after `before`.
    fn reconfigure(&mut self, before: &ParameterSet) -> FxResult<()> {
        if let Err(e) = self.frames.validate(&self.params) {
            log::warn!("[{}] {}", self.name(), e);
            if self.state != ControllerState::Uninitialized {
                self.enter_stopped();
            }
            return Err(e);
        }
        let restart = self
            .params
            .changed_since(before)
            .into_iter()
            .any(|name| self.frames.restarts_on(name));
        match self.state {
            ControllerState::Uninitialized | ControllerState::Destroyed => {}
            ControllerState::Stopped => {
                // Phase survives recovery unless the run itself changed shape.
                if restart {
                    self.frames.restart(&self.params);
                }
                self.state = ControllerState::Paused;
                log::info!("[{}] configuration valid again", self.name());
                self.redraw();
            }
            ControllerState::Paused => {
                if restart {
                    self.frames.restart(&self.params);
                }
                self.redraw();
            }
            ControllerState::Playing => {
                if restart {
                    self.frames.cancel(&mut self.host);
                    self.frames.restart(&self.params);
                    self.frames.schedule(&mut self.host);
                }
            }
        }
        Ok(())
    }

    /// Draw the current state once without advancing. Safe to call any
    /// number of times.
    fn redraw(&mut self) {
        let Some((painter, geometry)) = self.surface.painter_mut() else {
            return;
        };
        if self.state == ControllerState::Stopped {
            self.frames.draw_stopped(painter, geometry, &self.params);
        } else {
            self.frames.draw(painter, geometry, &self.params);
        }
    }
}
