//! Periodic refresh timer.
//!
//! The host owns the actual timer machinery behind the [`Scheduler`] trait.
//! [`RefreshTimer`] wraps it with idempotent start/stop: starting always
//! cancels the previous schedule first, so a widget never has more than one
//! live refresh callback no matter how often its configuration is reapplied.

use core::time::Duration;

/// Refresh cadence of the clock.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Host periodic-callback scheduler.
pub trait Scheduler {
    /// Identifies one schedule. Handles are never reused while live.
    type Handle: Copy + Eq + core::fmt::Debug;

    /// Arm a callback that fires every `interval` until cancelled.
    fn schedule_repeating(&mut self, interval: Duration) -> Self::Handle;

    /// Stop a schedule. Cancelling an unknown handle is a no-op.
    fn cancel(&mut self, handle: Self::Handle);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    type Handle = S::Handle;

    fn schedule_repeating(&mut self, interval: Duration) -> Self::Handle { (**self).schedule_repeating(interval) }

    fn cancel(&mut self, handle: Self::Handle) { (**self).cancel(handle); }
}

/// Timer state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimerState<H> {
    #[default]
    Idle,
    Armed(H),
}

/// A single repeating schedule.
#[derive(Debug)]
pub struct RefreshTimer<H> {
    state: TimerState<H>,
    interval: Duration,
}

impl<H> Default for RefreshTimer<H> {
    fn default() -> Self { Self::new(REFRESH_INTERVAL) }
}

impl<H> RefreshTimer<H> {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: TimerState::Idle,
            interval,
        }
    }

    pub fn interval(&self) -> Duration { self.interval }
}

impl<H: Copy + Eq + core::fmt::Debug> RefreshTimer<H> {
    /// Cancel any active schedule and arm a new one.
    pub fn start<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) -> H {
        self.stop(scheduler);
        let handle = scheduler.schedule_repeating(self.interval);
        log::debug!("refresh timer armed: {handle:?} every {:?}", self.interval);
        self.state = TimerState::Armed(handle);
        handle
    }

    /// Cancel the active schedule, if any.
    pub fn stop<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if let TimerState::Armed(handle) = core::mem::replace(&mut self.state, TimerState::Idle) {
            scheduler.cancel(handle);
            log::debug!("refresh timer cancelled: {handle:?}");
        }
    }

    /// True if `handle` is the live schedule. Ticks from anything else are stale.
    pub fn is_current(&self, handle: H) -> bool { self.state == TimerState::Armed(handle) }

    pub fn is_armed(&self) -> bool { matches!(self.state, TimerState::Armed(_)) }

    pub fn state(&self) -> TimerState<H> { self.state }
}

// =============================================================================
// Test Double
// =============================================================================

/// Scheduler that only tracks which handles are live.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u32,
    live: Vec<u32>,
    /// Total number of schedules ever armed.
    pub armed: usize,
    /// Total number of cancellations of live handles.
    pub cancelled: usize,
}

#[cfg(any(test, feature = "test-util"))]
impl ManualScheduler {
    pub fn new() -> Self { Self::default() }

    /// Handles currently scheduled.
    pub fn live(&self) -> &[u32] { &self.live }
}

#[cfg(any(test, feature = "test-util"))]
impl Scheduler for ManualScheduler {
    type Handle = u32;

    fn schedule_repeating(&mut self, _interval: Duration) -> u32 {
        self.next += 1;
        self.live.push(self.next);
        self.armed += 1;
        self.next
    }

    fn cancel(&mut self, handle: u32) {
        let before = self.live.len();
        self.live.retain(|&h| h != handle);
        if self.live.len() != before {
            self.cancelled += 1;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
