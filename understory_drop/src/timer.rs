// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A virtual-clock [`Scheduler`] for headless hosts and tests.
//!
//! ## Usage
//!
//! 1) Pass the scheduler wherever a [`Scheduler`] is expected.
//! 2) Call [`ManualScheduler::advance`] from your event loop with the elapsed time.
//! 3) Feed each returned [`TimerId`] back into
//!    [`Draggable::timer_fired`](crate::draggable::Draggable::timer_fired).
//!
//! ```
//! use core::time::Duration;
//! use understory_drop::timer::ManualScheduler;
//! use understory_drop::types::Scheduler;
//!
//! let mut timers = ManualScheduler::new();
//! let a = timers.schedule(Duration::from_millis(25));
//! let b = timers.schedule(Duration::from_millis(10));
//! assert!(timers.advance(Duration::from_millis(5)).is_empty());
//! assert_eq!(timers.advance(Duration::from_millis(20)), vec![b, a]);
//! ```

use alloc::vec::Vec;
use core::time::Duration;

use crate::types::{Scheduler, TimerId};

/// Deterministic scheduler driven by explicit time steps.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<(TimerId, Duration)>,
}

impl ManualScheduler {
    /// Create a scheduler at time zero with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of callbacks not yet due or cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if `timer` is scheduled and has not fired.
    pub fn is_pending(&self, timer: TimerId) -> bool {
        self.pending.iter().any(|(id, _)| *id == timer)
    }

    /// Move the clock forward and return the timers that became due, earliest deadline first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        let now = self.now;
        let mut due: Vec<(TimerId, Duration)> = Vec::new();
        self.pending.retain(|&(id, deadline)| {
            if deadline <= now {
                due.push((id, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(id, deadline)| (deadline, id));
        due.into_iter().map(|(id, _)| id).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push((id, self.now + delay));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.pending.retain(|(id, _)| *id != timer);
    }
}
