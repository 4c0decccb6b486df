//! Animated canvas controllers for decorative site visuals.
//!
//! Each controller owns a parameter store, a drawing surface sized to its
//! container and a render loop driven by the host's frame scheduler. The core
//! is plain Rust and runs anywhere; the browser bindings (`mountWave`,
//! `mountIndicator`, `mountCrt`) are only built for `wasm32`.

pub mod config;
pub mod constants;
pub mod controller;
pub mod core;
pub mod error;
pub mod frame;
pub mod host;
pub mod renderers;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::{CrtConfig, IndicatorConfig, ModePreset, Mount, WaveConfig};
pub use controller::{Controller, ControllerState, PlaybackState};
pub use error::{FxError, FxResult};
pub use host::{FrameToken, Host};
