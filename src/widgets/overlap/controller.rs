//! The overlap animation state machine.
//!
//! ```text
//!   Idle ──draw──▶ Animating ──last frame──▶ Completed
//!                      │                        ▲
//!                      └──────── detach ────────┘
//! ```
//!
//! The reveal is one-shot: once `Completed` the controller never starts another run. Draw
//! ticks in that phase only pin the panel at full extent; the recorded state stays as it was.
//!
//! The controller decides and mutates the panel. Listener calls and the enabled-state
//! policy are left to the container, which acts on the returned [`OverlapEvent`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::animation::{AdvanceResult, ValueAnimator};
use crate::layout::MAX_EXTENT;
use crate::widgets::element::Element;

use super::panel::set_dynamic_extent;
use super::saved_state::PersistedSnapshot;
use super::style::{ResumePolicy, StyleConfiguration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPhase {
    #[default]
    Idle,
    Animating,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlapState {
    pub phase: OverlapPhase,
    /// Panel extent along the reveal axis
    pub current_extent: u32,
    /// Progress checkpoint, never above the configured duration
    pub elapsed_ms: u64,
}

/// What the container has to act on after a controller step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapEvent {
    /// A run started.
    Started,
    /// A run reached its end value.
    Completed,
    /// A run was cut short by teardown.
    Cancelled,
    /// A draw in the completed phase re-applied the final state.
    Settled,
}

#[derive(Debug)]
pub struct OverlapController {
    style: Arc<StyleConfiguration>,
    state: OverlapState,
    animator: Option<ValueAnimator<u32>>,
    /// Progress already accumulated before the current run started
    run_offset_ms: u64,
}

impl OverlapController {
    pub fn new(style: Arc<StyleConfiguration>) -> Self {
        Self {
            style,
            state: OverlapState::default(),
            animator: None,
            run_offset_ms: 0,
        }
    }

    pub fn state(&self) -> OverlapState {
        self.state
    }

    pub fn phase(&self) -> OverlapPhase {
        self.state.phase
    }

    pub fn is_animating(&self) -> bool {
        self.state.phase == OverlapPhase::Animating
    }

    /// Called once per container draw pass.
    ///
    /// `full_extent` is the container's current extent along the reveal axis. Without a
    /// panel (no measure pass yet) there is nothing to animate and the tick is dropped.
    pub fn on_draw_tick<D>(
        &mut self,
        panel: Option<&mut Element<D>>,
        full_extent: u32,
        now: Instant,
    ) -> Option<OverlapEvent> {
        let Some(panel) = panel else {
            log::debug!("Draw before first measure, overlap not started");
            return None;
        };

        match self.state.phase {
            OverlapPhase::Completed => {
                set_dynamic_extent(panel, self.style.overlap_edge(), full_extent);
                Some(OverlapEvent::Settled)
            }
            OverlapPhase::Animating => None,
            OverlapPhase::Idle => {
                self.start_run(panel, full_extent, now);
                Some(OverlapEvent::Started)
            }
        }
    }

    /// Budget of the next run and the progress it continues from.
    fn run_budget(&self) -> (u64, u64) {
        let duration = self.style.overlap_duration_ms();
        let elapsed = self.state.elapsed_ms;
        match self.style.resume_policy() {
            ResumePolicy::Checkpoint if elapsed > 0 => (elapsed, 0),
            ResumePolicy::Checkpoint => (duration, 0),
            ResumePolicy::RemainingTime => (duration.saturating_sub(elapsed), elapsed),
        }
    }

    fn start_run<D>(&mut self, panel: &mut Element<D>, full_extent: u32, now: Instant) {
        // guarded by the caller, but a second animator must never exist
        if self.animator.is_some() {
            return;
        }

        let (budget_ms, offset_ms) = self.run_budget();
        let start = self.state.current_extent.min(full_extent);

        let mut animator = ValueAnimator::new(
            start,
            full_extent,
            Duration::from_millis(budget_ms),
            self.style.timing(),
        );
        animator.start(now);

        log::info!(
            "Overlap run started: {} -> {} over {}ms (resumed at {}ms)",
            start,
            full_extent,
            budget_ms,
            offset_ms
        );

        self.state.phase = OverlapPhase::Animating;
        self.state.current_extent = start;
        self.run_offset_ms = offset_ms;
        self.animator = Some(animator);
        set_dynamic_extent(panel, self.style.overlap_edge(), start);
    }

    /// Advance a running animation to `now`, driven by the host's animation scheduler.
    pub fn on_animation_frame<D>(
        &mut self,
        panel: Option<&mut Element<D>>,
        now: Instant,
    ) -> Option<OverlapEvent> {
        if self.state.phase != OverlapPhase::Animating {
            return None;
        }
        let animator = self.animator.as_mut()?;

        let result = animator.advance(now);
        let play_ms = animator.play_time().as_millis() as u64;
        self.state.elapsed_ms =
            (self.run_offset_ms + play_ms).min(self.style.overlap_duration_ms());

        let value = match result {
            AdvanceResult::NoChange => return None,
            AdvanceResult::Changed(value) | AdvanceResult::Finished(value) => value,
        };
        self.state.current_extent = value;
        if let Some(panel) = panel {
            set_dynamic_extent(panel, self.style.overlap_edge(), value);
        }

        if !result.is_finished() {
            return None;
        }

        log::info!("Overlap run completed at extent {}", value);
        self.state.phase = OverlapPhase::Completed;
        self.animator = None;
        Some(OverlapEvent::Completed)
    }

    /// Stop a running animation on teardown. The overlap is treated as done, not rolled back.
    pub fn cancel(&mut self) -> Option<OverlapEvent> {
        if self.state.phase != OverlapPhase::Animating {
            return None;
        }
        if let Some(mut animator) = self.animator.take() {
            animator.cancel();
        }
        log::info!(
            "Overlap run cancelled at extent {} ({}ms)",
            self.state.current_extent,
            self.state.elapsed_ms
        );
        self.state.phase = OverlapPhase::Completed;
        Some(OverlapEvent::Cancelled)
    }

    pub fn save(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            completed: self.state.phase == OverlapPhase::Completed,
            current_extent: self.state.current_extent,
            elapsed_ms: self.state.elapsed_ms,
        }
    }

    /// Replace the state with a saved one. Any run in flight is dropped without
    /// notifications. Extents above [`MAX_EXTENT`] are clamped.
    pub fn restore(&mut self, snapshot: PersistedSnapshot) {
        if self.animator.take().is_some() {
            log::debug!("Restoring overlap state over a running animation");
        }
        self.state = OverlapState {
            phase: if snapshot.completed {
                OverlapPhase::Completed
            } else {
                OverlapPhase::Idle
            },
            current_extent: snapshot.current_extent.min(MAX_EXTENT),
            elapsed_ms: snapshot.elapsed_ms.min(self.style.overlap_duration_ms()),
        };
        self.run_offset_ms = 0;
        log::debug!("Restored overlap state {:?}", self.state);
    }
}
