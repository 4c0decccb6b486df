use crate::core::{ContentBox, Painter};
use crate::error::FxResult;

/// Handle for one outstanding per-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameToken(pub i32);

/// The environment a controller runs in: the container it draws under, the
/// per-frame scheduler and resize notifications.
///
/// Frame and resize callbacks are delivered back to the controller by the
/// host's owner (`Controller::on_frame` / `Controller::on_resize`), always on
/// the same thread and never while another controller call is running.
pub trait Host {
    type Surface: Painter;

    /// Human-readable name of the container, used in diagnostics.
    fn describe(&self) -> String;
    /// `None` when the container is no longer present.
    fn content_box(&self) -> Option<ContentBox>;
    fn device_pixel_ratio(&self) -> f64;
    /// Whether a surface created by this crate already lives under the container.
    fn surface_exists(&self) -> bool;
    fn create_surface(&mut self) -> FxResult<Self::Surface>;
    fn release_surface(&mut self, surface: Self::Surface);
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
    fn observe_resize(&mut self);
    fn unobserve_resize(&mut self);
}
