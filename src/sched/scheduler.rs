// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Super-loop scheduler.
//!
//! Typical usage pattern:
//!
//! ```no_run
//! # use dualdrive::sched::{Clock, Instant, Scheduler, Task};
//! # struct Tim5;
//! # impl Clock for Tim5 { fn now(&self) -> Instant { Instant::from_ticks(0) } }
//! # struct Idle;
//! # impl Task for Idle { fn run(&mut self, _now: Instant) {} }
//! # let (mut ui, mut encoder) = (Idle, Idle);
//! let scheduler = Scheduler::new(Tim5, [&mut ui as &mut dyn Task, &mut encoder]);
//! scheduler.run();
//! ```
//!
//! The scheduler itself never waits. If a task's `run` does not return, every task stalls; tasks
//! are non-blocking by construction and there is no supervision.

use super::{Clock, Task};

pub struct Scheduler<'a, C: Clock, const N: usize> {
    clock: C,
    tasks: [&'a mut dyn Task; N],
    passes: u32,
}

impl<'a, C: Clock, const N: usize> Scheduler<'a, C, N> {
    /// Tasks run in array order on every pass.
    pub fn new(clock: C, tasks: [&'a mut dyn Task; N]) -> Self {
        Self {
            clock,
            tasks,
            passes: 0,
        }
    }

    /// Give every task one turn. The clock is read immediately before each task's turn.
    pub fn run_once(&mut self) {
        for task in self.tasks.iter_mut() {
            let now = self.clock.now();
            task.run(now);
        }
        self.passes = self.passes.wrapping_add(1);
    }

    /// Completed passes, wrapping.
    #[inline]
    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn run(mut self) -> ! {
        crate::log_info!("scheduler: starting {} tasks", N);
        loop {
            self.run_once();
        }
    }
}
