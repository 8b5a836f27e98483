//! Safe-window spin scheduler
//!
//! Drives the strip from rest to an exact target distance over a fixed
//! duration, sampled once per rendered frame. Progress is computed on the
//! true, unwrapped distance; only the reported on-screen offset is folded
//! into the strip's [`SafeWindow`].
//!
//! One spin at a time: starting a spin cancels whatever was in flight.
//! After the strip stops, the animator stays busy for the reveal window and
//! then clears itself.

use serde::Serialize;

use jp_strip::SafeWindow;

use crate::timing::SpinTiming;

/// Identifies one started spin. Stale handles never match a newer spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Animator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SpinPhase {
    #[default]
    Idle,
    /// Strip is scrolling
    Spinning,
    /// Strip stopped, winner banner showing
    Revealing,
}

/// What to scroll and how far
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpinPlan {
    /// Unwrapped scroll distance (px)
    pub target_distance: f64,
    pub window: SafeWindow,
}

impl SpinPlan {
    /// On-screen offset `elapsed_ms` into the spin
    #[inline]
    pub fn offset_at(&self, timing: &SpinTiming, elapsed_ms: f64) -> f64 {
        self.window
            .visual_offset(timing.eased_at(elapsed_ms) * self.target_distance)
    }
}

/// One-shot notifications emitted by [`SpinAnimator::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameEvent {
    /// Strip reached its target this frame
    SpinCompleted,
    /// Reveal window closed; all transient state was cleared
    RevealFinished,
}

/// Per-frame output for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameOutput {
    /// Strip translation (px)
    pub offset: f64,
    /// Linear spin progress (0.0 - 1.0)
    pub progress: f64,
    pub spinning: bool,
    pub show_winner: bool,
    pub event: Option<FrameEvent>,
}

impl FrameOutput {
    fn idle(offset: f64) -> Self {
        Self {
            offset,
            progress: 0.0,
            spinning: false,
            show_winner: false,
            event: None,
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveSpin {
    handle: AnimationHandle,
    plan: SpinPlan,
    timing: SpinTiming,
    started_at_ms: f64,
    completed_at_ms: Option<f64>,
}

/// Frame-driven spin scheduler
#[derive(Debug)]
pub struct SpinAnimator {
    timing: SpinTiming,
    next_id: u64,
    active: Option<ActiveSpin>,
    offset: f64,
}

impl SpinAnimator {
    pub fn new(timing: SpinTiming) -> Self {
        Self {
            timing,
            next_id: 1,
            active: None,
            offset: 0.0,
        }
    }

    pub fn timing(&self) -> &SpinTiming {
        &self.timing
    }

    /// Takes effect on the next spin; a spin in flight keeps its timing
    pub fn set_timing(&mut self, timing: SpinTiming) {
        self.timing = timing;
    }

    /// Start a spin at `now_ms`, cancelling any spin in flight
    pub fn start(&mut self, plan: SpinPlan, now_ms: f64) -> AnimationHandle {
        if let Some(previous) = self.cancel() {
            log::debug!("Spin {} superseded", previous.id());
        }

        let handle = AnimationHandle(self.next_id);
        self.next_id += 1;

        self.offset = plan.window.visual_offset(0.0);
        log::info!(
            "Spin {} started: distance {:.1}px over {}ms",
            handle.id(),
            plan.target_distance,
            self.timing.spin_duration_ms
        );

        self.active = Some(ActiveSpin {
            handle,
            plan,
            timing: self.timing.clone(),
            started_at_ms: now_ms,
            completed_at_ms: None,
        });
        handle
    }

    /// Advance to `now_ms` and report what to draw
    pub fn tick(&mut self, now_ms: f64) -> FrameOutput {
        let Some(active) = self.active.as_mut() else {
            return FrameOutput::idle(self.offset);
        };

        if let Some(completed_at) = active.completed_at_ms {
            if now_ms - completed_at >= active.timing.reveal_duration_ms {
                log::debug!("Spin {} reveal finished", active.handle.id());
                self.active = None;
                self.offset = 0.0;
                return FrameOutput {
                    event: Some(FrameEvent::RevealFinished),
                    ..FrameOutput::idle(0.0)
                };
            }
            return FrameOutput {
                offset: self.offset,
                progress: 1.0,
                spinning: false,
                show_winner: true,
                event: None,
            };
        }

        let elapsed = (now_ms - active.started_at_ms).max(0.0);
        let progress = active.timing.progress_at(elapsed);
        self.offset = active.plan.offset_at(&active.timing, elapsed);

        if progress >= 1.0 {
            active.completed_at_ms = Some(now_ms);
            log::info!("Spin {} landed", active.handle.id());
            return FrameOutput {
                offset: self.offset,
                progress: 1.0,
                spinning: false,
                show_winner: true,
                event: Some(FrameEvent::SpinCompleted),
            };
        }

        FrameOutput {
            offset: self.offset,
            progress,
            spinning: true,
            show_winner: false,
            event: None,
        }
    }

    /// Offset a spin with `plan` shows `elapsed_ms` in, without touching
    /// animator state. Same inputs always give the same offset.
    pub fn sample(&self, plan: &SpinPlan, elapsed_ms: f64) -> f64 {
        plan.offset_at(&self.timing, elapsed_ms)
    }

    /// Drop the spin in flight (and its reveal window)
    pub fn cancel(&mut self) -> Option<AnimationHandle> {
        let cancelled = self.active.take().map(|active| active.handle);
        if cancelled.is_some() {
            self.offset = 0.0;
        }
        cancelled
    }

    pub fn phase(&self) -> SpinPhase {
        match &self.active {
            None => SpinPhase::Idle,
            Some(active) if active.completed_at_ms.is_some() => SpinPhase::Revealing,
            Some(_) => SpinPhase::Spinning,
        }
    }

    /// Spinning or revealing. Status polling stays suspended while busy.
    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn handle(&self) -> Option<AnimationHandle> {
        self.active.as_ref().map(|active| active.handle)
    }

    pub fn plan(&self) -> Option<&SpinPlan> {
        self.active.as_ref().map(|active| &active.plan)
    }

    /// Last computed strip offset
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl Default for SpinAnimator {
    fn default() -> Self {
        Self::new(SpinTiming::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use jp_strip::StripGeometry;

    fn plan(tile_count: usize, target: usize) -> SpinPlan {
        let geometry = StripGeometry::new(120.0, 4.0, 800.0);
        let window = SafeWindow::new(&geometry, tile_count, 2, 4).unwrap();
        let target_distance = geometry.spin_distance(target, tile_count, 300).unwrap();
        SpinPlan {
            target_distance,
            window,
        }
    }

    #[test]
    fn test_start_centers_strip() {
        let mut animator = SpinAnimator::default();
        let plan = plan(100, 7);
        animator.start(plan, 0.0);
        assert_eq!(animator.phase(), SpinPhase::Spinning);
        assert_abs_diff_eq!(
            animator.offset(),
            plan.window.buffer_px + plan.window.loop_width / 2.0
        );
    }

    #[test]
    fn test_full_lifecycle() {
        let mut animator = SpinAnimator::default();
        let plan = plan(100, 7);
        animator.start(plan, 1_000.0);

        let mid = animator.tick(6_000.0);
        assert!(mid.spinning);
        assert!(!mid.show_winner);
        assert_abs_diff_eq!(mid.progress, 0.5);

        let done = animator.tick(11_000.0);
        assert_eq!(done.event, Some(FrameEvent::SpinCompleted));
        assert!(!done.spinning);
        assert!(done.show_winner);
        assert_eq!(plan.window.tile_under_marker(done.offset), 7);
        assert_eq!(animator.phase(), SpinPhase::Revealing);
        assert!(animator.is_busy());

        let revealing = animator.tick(15_000.0);
        assert!(revealing.show_winner);
        assert_eq!(revealing.offset, done.offset);
        assert_eq!(revealing.event, None);

        let cleared = animator.tick(19_000.0);
        assert_eq!(cleared.event, Some(FrameEvent::RevealFinished));
        assert!(!cleared.show_winner);
        assert_eq!(animator.phase(), SpinPhase::Idle);
        assert!(!animator.is_busy());
    }

    #[test]
    fn test_offsets_stay_in_safe_window() {
        let mut animator = SpinAnimator::default();
        let plan = plan(37, 36);
        animator.start(plan, 0.0);
        // 60 fps over the whole spin
        let mut t = 0.0;
        while t <= 10_000.0 {
            let frame = animator.tick(t);
            assert!(plan.window.contains(frame.offset), "offset {} at {}", frame.offset, t);
            t += 1000.0 / 60.0;
        }
    }

    #[test]
    fn test_restart_cancels_previous() {
        let mut animator = SpinAnimator::default();
        let first = animator.start(plan(100, 1), 0.0);
        animator.tick(500.0);
        let second = animator.start(plan(100, 2), 600.0);
        assert_ne!(first, second);
        assert_eq!(animator.handle(), Some(second));
        // the new spin restarts from zero progress
        let frame = animator.tick(600.0);
        assert_eq!(frame.progress, 0.0);
    }

    #[test]
    fn test_cancel_clears_state() {
        let mut animator = SpinAnimator::default();
        let handle = animator.start(plan(100, 1), 0.0);
        assert_eq!(animator.cancel(), Some(handle));
        assert_eq!(animator.cancel(), None);
        let frame = animator.tick(100.0);
        assert!(!frame.spinning);
        assert_eq!(frame.offset, 0.0);
    }

    #[test]
    fn test_sample_is_idempotent() {
        let animator = SpinAnimator::default();
        let plan = plan(100, 42);
        for elapsed in [0.0, 1_234.5, 9_999.0, 10_000.0] {
            assert_eq!(animator.sample(&plan, elapsed), animator.sample(&plan, elapsed));
        }
    }

    #[test]
    fn test_instant_timing_lands_on_first_tick() {
        let mut animator = SpinAnimator::new(SpinTiming::instant());
        let plan = plan(100, 13);
        animator.start(plan, 0.0);
        let frame = animator.tick(0.0);
        assert_eq!(frame.event, Some(FrameEvent::SpinCompleted));
        assert_eq!(plan.window.tile_under_marker(frame.offset), 13);
        assert_eq!(animator.tick(0.0).event, Some(FrameEvent::RevealFinished));
    }
}
