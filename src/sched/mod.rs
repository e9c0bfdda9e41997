// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Cooperative Scheduling
//!
//! There is no kernel. [`Scheduler`] spins forever and calls every [`Task`] once per pass, in a
//! fixed order. A task that is not due yet returns immediately; a task that is due does one short
//! step of its own state machine and returns. Nothing ever blocks.
//!
//! ## Modules
//!
//! - [`time`] - Wrapping microsecond instants and drift-free periodic deadlines.
//! - [`scheduler`] - The super-loop.

pub mod scheduler;
pub mod time;

pub use scheduler::Scheduler;
pub use time::{Deadline, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// A unit of periodic, non-blocking work.
///
/// `run` is called on every scheduler pass with the time read just before the call. The task
/// gates itself on its own [`Deadline`] and must return promptly whether or not it did anything.
pub trait Task {
    fn run(&mut self, now: Instant);
}

impl<T: Task + ?Sized> Task for &mut T {
    #[inline]
    fn run(&mut self, now: Instant) {
        (**self).run(now)
    }
}
