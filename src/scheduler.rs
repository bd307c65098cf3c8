//! Periodic callbacks driven by the run loop.
//!
//! The simulator has no timer thread. [`LoopScheduler`] stores a deadline per
//! schedule and the run loop asks it once per frame which schedules are due.
//! A due schedule is re-armed one interval after its previous deadline, so a
//! slow frame delays a tick but does not shift the cadence. When the loop
//! falls more than one interval behind, missed ticks are collapsed into one.

use std::time::{Duration, Instant};

use clock_common::Scheduler;

/// Identifies one schedule of a [`LoopScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

#[derive(Debug)]
struct Entry {
    id: TimerId,
    interval: Duration,
    deadline: Instant,
}

/// Deadline-based scheduler polled by the run loop.
#[derive(Debug, Default)]
pub struct LoopScheduler {
    next_id: u32,
    entries: Vec<Entry>,
}

impl LoopScheduler {
    pub fn new() -> Self { Self::default() }

    /// Arm a schedule whose first tick is one interval after `now`.
    pub fn schedule_at(&mut self, now: Instant, interval: Duration) -> TimerId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = TimerId(self.next_id);
        self.entries.push(Entry {
            id,
            interval,
            deadline: now + interval,
        });
        id
    }

    /// Schedules due at `now`, in arming order. Each is re-armed.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerId> {
        let mut due = Vec::new();
        for entry in &mut self.entries {
            if entry.deadline > now {
                continue;
            }
            due.push(entry.id);
            entry.deadline += entry.interval;
            if entry.deadline <= now {
                // Fell behind by more than one interval
                entry.deadline = now + entry.interval;
            }
        }
        due
    }

    /// Number of live schedules.
    #[cfg(test)]
    pub fn len(&self) -> usize { self.entries.len() }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Earliest pending deadline.
    #[cfg(test)]
    pub fn next_deadline(&self) -> Option<Instant> { self.entries.iter().map(|e| e.deadline).min() }
}

impl Scheduler for LoopScheduler {
    type Handle = TimerId;

    fn schedule_repeating(&mut self, interval: Duration) -> TimerId { self.schedule_at(Instant::now(), interval) }

    fn cancel(&mut self, handle: TimerId) { self.entries.retain(|e| e.id != handle); }
}

// =============================================================================
// Unit Tests
// =============================================================================
