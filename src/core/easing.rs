use crate::error::FxError;
use std::f64::consts::PI;
use std::str::FromStr;

/// Named easing curves accepted by the indicator ripple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutSine,
    EaseOutCubic,
}

impl Easing {
    /// Map `t` in [0, 1] (clamped) to eased progress in [0, 1].
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) * 0.5,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInQuad => "easeInQuad",
            Easing::EaseOutQuad => "easeOutQuad",
            Easing::EaseInOutSine => "easeInOutSine",
            Easing::EaseOutCubic => "easeOutCubic",
        }
    }
}

impl FromStr for Easing {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Easing::Linear),
            "easeInQuad" => Ok(Easing::EaseInQuad),
            "easeOutQuad" => Ok(Easing::EaseOutQuad),
            "easeInOutSine" => Ok(Easing::EaseInOutSine),
            "easeOutCubic" => Ok(Easing::EaseOutCubic),
            other => Err(FxError::InvalidConfiguration(format!(
                "unknown easing `{}`",
                other
            ))),
        }
    }
}
