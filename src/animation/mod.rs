//! Interpolation primitives used by the overlap animation.
//!
//! [`ValueAnimator`] moves a value from a start to an end over a fixed duration. It has no
//! clock of its own: the host passes the frame timestamp to [`ValueAnimator::advance`], which
//! keeps the animation deterministic and lets it run inside any event loop.

mod animatable;
mod animator;
mod timing;

pub use animatable::Animatable;
pub use animator::{AdvanceResult, ValueAnimator};
pub use timing::TimingFunction;
