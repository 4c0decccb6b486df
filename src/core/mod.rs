pub mod easing;
pub mod params;
pub mod surface;

pub use easing::*;
pub use params::*;
pub use surface::*;
