// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wrapping microsecond time and periodic deadlines.
//!
//! The task clock is a free-running 32-bit microsecond counter that overflows back to zero about
//! every 71.6 minutes. Instants are therefore never compared with `>`; they are compared through
//! the signed difference of their raw values, which is correct as long as the two readings are
//! less than 2^31 µs (about 35 minutes) apart.

/// A reading of the task clock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(u32);

impl Instant {
    #[inline]
    pub const fn from_ticks(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Raw counter value in microseconds.
    #[inline]
    pub const fn ticks(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn wrapping_add(self, us: u32) -> Self {
        Self(self.0.wrapping_add(us))
    }

    /// Signed microseconds from `earlier` to `self`.
    #[inline]
    pub const fn ticks_since(self, earlier: Instant) -> i32 {
        self.0.wrapping_sub(earlier.0) as i32
    }

    /// True once `self` is at or past `target`.
    #[inline]
    pub const fn has_reached(self, target: Instant) -> bool {
        self.ticks_since(target) >= 0
    }
}

/// Fixed-period deadline.
///
/// Each firing moves the target forward by exactly one period from the previous target, never
/// from "now", so time spent inside a task does not accumulate as drift.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Deadline {
    next: Instant,
    period_us: u32,
}

impl Deadline {
    /// First firing is one period after `start`.
    pub const fn new(start: Instant, period_us: u32) -> Self {
        Self {
            next: start.wrapping_add(period_us),
            period_us,
        }
    }

    #[inline]
    pub const fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Target of the next firing.
    #[inline]
    pub const fn next(&self) -> Instant {
        self.next
    }

    /// Returns `true`, and advances the target by one period, when `now` has reached it.
    #[inline]
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.has_reached(self.next) {
            self.next = self.next.wrapping_add(self.period_us);
            true
        } else {
            false
        }
    }

    /// Re-anchor the grid: the next firing is at `target`, later ones follow every period.
    #[inline]
    pub fn rearm(&mut self, target: Instant) {
        self.next = target;
    }
}
