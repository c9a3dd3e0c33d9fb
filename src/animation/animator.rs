use std::time::{Duration, Instant};

use super::{Animatable, TimingFunction};

/// Result of advancing an animation, indicating whether the value changed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    /// Value did not change (animation not running or same value)
    NoChange,
    /// Value changed to a new value
    Changed(T),
    /// The animation reached its end value and stopped
    Finished(T),
}

impl<T> AdvanceResult<T> {
    pub fn is_finished(&self) -> bool {
        matches!(self, AdvanceResult::Finished(_))
    }
}

/// Drives a value from `start` to `end` over a fixed duration.
///
/// Time is supplied by the caller; the animator never reads a clock.
#[derive(Debug, Clone)]
pub struct ValueAnimator<T: Animatable> {
    /// Value when animation started
    start: T,
    /// Value reached at the end of the run
    end: T,
    /// Current interpolated value
    current: T,
    duration: Duration,
    timing: TimingFunction,
    /// Set by `start()`, cleared on finish or cancel
    start_time: Option<Instant>,
    /// Time played so far, clamped to `duration`
    play_time: Duration,
}

impl<T: Animatable> ValueAnimator<T> {
    pub fn new(start: T, end: T, duration: Duration, timing: TimingFunction) -> Self {
        Self {
            start,
            end,
            current: start,
            duration,
            timing,
            start_time: None,
            play_time: Duration::ZERO,
        }
    }

    /// Start the run at `now`. Starting an already running animator is ignored.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.start_time.is_some() {
            return false;
        }
        self.start_time = Some(now);
        self.play_time = Duration::ZERO;
        self.current = self.start;
        true
    }

    /// Advance the animation to `now` and report whether the value changed.
    ///
    /// Timestamps earlier than the start are treated as the start.
    pub fn advance(&mut self, now: Instant) -> AdvanceResult<T> {
        let Some(start_time) = self.start_time else {
            return AdvanceResult::NoChange;
        };

        let elapsed = now.saturating_duration_since(start_time).min(self.duration);
        self.play_time = elapsed;

        let raw_progress = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };

        if elapsed >= self.duration {
            self.start_time = None;
            self.current = self.end;
            return AdvanceResult::Finished(self.end);
        }

        let new_value = T::lerp(&self.start, &self.end, self.timing.evaluate(raw_progress));
        if new_value == self.current {
            return AdvanceResult::NoChange;
        }
        self.current = new_value;
        AdvanceResult::Changed(new_value)
    }

    /// Stop the run where it is. Returns false if it was not running.
    pub fn cancel(&mut self) -> bool {
        self.start_time.take().is_some()
    }

    /// Time played by the current (or last) run
    pub fn play_time(&self) -> Duration {
        self.play_time
    }
}
