//! Timing functions (easing curves) for animations.
//!
//! Timing functions control the rate of change during an animation, allowing
//! for natural-feeling motion rather than linear interpolation.
//!
//! Every curve here is monotonic on `[0, 1]` and maps `0 -> 0` and `1 -> 1`, so an
//! animated extent never shrinks mid-run and always lands exactly on its target.
//!
//! - [`TimingFunction::Linear`] - Constant speed (no easing)
//! - [`TimingFunction::EaseIn`] - Starts slow, ends fast (acceleration)
//! - [`TimingFunction::EaseOut`] - Starts fast, ends slow (deceleration)
//! - [`TimingFunction::EaseInOut`] - Slow start and end, fast middle

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Timing function that controls the animation curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    #[default]
    Linear,
    /// Starts slow, ends fast
    EaseIn,
    /// Starts fast, ends slow
    EaseOut,
    /// Starts slow, speeds up, then slows down
    EaseInOut,
}

impl TimingFunction {
    /// Evaluate the timing function at time t (0.0 to 1.0).
    /// Input outside that range is clamped.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => ease_in(t),
            TimingFunction::EaseOut => ease_out(t),
            TimingFunction::EaseInOut => ease_in_out(t),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimingFunction::Linear => "linear",
            TimingFunction::EaseIn => "ease_in",
            TimingFunction::EaseOut => "ease_out",
            TimingFunction::EaseInOut => "ease_in_out",
        }
    }
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimingFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(TimingFunction::Linear),
            "ease_in" | "ease-in" => Ok(TimingFunction::EaseIn),
            "ease_out" | "ease-out" => Ok(TimingFunction::EaseOut),
            "ease_in_out" | "ease-in-out" => Ok(TimingFunction::EaseInOut),
            other => Err(format!("unknown timing function '{other}'")),
        }
    }
}

// Easing functions

fn ease_in(t: f32) -> f32 {
    t * t
}

fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}
