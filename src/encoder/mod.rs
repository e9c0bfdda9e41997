// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Quadrature Encoder Task
//!
//! Hardware timers count encoder edges in a register that silently wraps at its auto-reload value
//! (16 bits on TIM3). The task samples that register once per period, converts the raw difference
//! into a signed delta that is correct across one wrap, and integrates the deltas into an
//! unbounded position. It is the only writer of the `position` and `delta` signals and reads the
//! UI's zero request. The request is a rising edge: the UI holds the flag for a whole UI period,
//! and motion during that window still counts.

use crate::config::EncoderConfig;
use crate::sched::{Deadline, Instant, Task};
use crate::sync::{Reader, Writer};

/// A free-running hardware edge counter.
pub trait QuadratureCounter {
    /// Current raw count.
    fn count(&self) -> u32;

    /// Highest raw count before the counter wraps back to zero.
    fn auto_reload(&self) -> u32;
}

/// Signed change between two raw counter readings.
///
/// Any raw difference larger than half the counter range is taken as a wrap in the opposite
/// direction. Correct as long as the shaft moves less than half the range between samples.
pub fn wrap_delta(now: u32, before: u32, auto_reload: u32) -> i32 {
    let span = i64::from(auto_reload) + 1;
    let mut delta = (i64::from(now) - i64::from(before)).rem_euclid(span);
    if delta > span / 2 {
        delta -= span;
    }
    delta as i32
}

/// Tracks position and per-update delta on top of a raw counter.
pub struct EncoderReader<Q: QuadratureCounter> {
    counter: Q,
    last_raw: u32,
    position: i32,
    delta: i32,
}

impl<Q: QuadratureCounter> EncoderReader<Q> {
    /// The current count becomes the zero reference.
    pub fn new(counter: Q) -> Self {
        let last_raw = counter.count();
        Self {
            counter,
            last_raw,
            position: 0,
            delta: 0,
        }
    }

    /// Sample the counter and fold the change into the position.
    pub fn update(&mut self) {
        let raw = self.counter.count();
        self.delta = wrap_delta(raw, self.last_raw, self.counter.auto_reload());
        self.position = self.position.wrapping_add(self.delta);
        self.last_raw = raw;
    }

    #[inline]
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Change seen by the last `update`.
    #[inline]
    pub fn delta(&self) -> i32 {
        self.delta
    }

    /// Make the current shaft angle the new zero.
    #[inline]
    pub fn zero(&mut self) {
        self.position = 0;
    }

}

/// Signals one encoder task publishes and consumes.
pub struct EncoderLink<'a> {
    pub position: Writer<'a, i32>,
    pub delta: Writer<'a, i32>,
    pub zero: Reader<'a, bool>,
}

pub struct EncoderTask<'a, Q: QuadratureCounter> {
    reader: EncoderReader<Q>,
    link: EncoderLink<'a>,
    tick: Deadline,
    zero_seen: bool,
}

impl<'a, Q: QuadratureCounter> EncoderTask<'a, Q> {
    pub fn new(counter: Q, link: EncoderLink<'a>, config: EncoderConfig, start: Instant) -> Self {
        Self {
            reader: EncoderReader::new(counter),
            link,
            tick: Deadline::new(start, config.period_us),
            zero_seen: false,
        }
    }

    pub fn reader(&self) -> &EncoderReader<Q> {
        &self.reader
    }
}

impl<Q: QuadratureCounter> Task for EncoderTask<'_, Q> {
    fn run(&mut self, now: Instant) {
        if !self.tick.poll(now) {
            return;
        }

        self.reader.update();
        let zero = self.link.zero.read();
        if zero && !self.zero_seen {
            self.reader.zero();
        }
        self.zero_seen = zero;
        self.link.position.write(self.reader.position());
        self.link.delta.write(self.reader.delta());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::Share;
    use core::cell::Cell;

    struct FakeCounter<'a> {
        raw: &'a Cell<u32>,
        auto_reload: u32,
    }

    impl QuadratureCounter for FakeCounter<'_> {
        fn count(&self) -> u32 {
            self.raw.get()
        }
        fn auto_reload(&self) -> u32 {
            self.auto_reload
        }
    }

    #[test]
    fn delta_across_16_bit_wrap() {
        assert_eq!(wrap_delta(10, 65_530, 0xFFFF), 16);
        assert_eq!(wrap_delta(65_530, 10, 0xFFFF), -16);
        assert_eq!(wrap_delta(1_000, 400, 0xFFFF), 600);
        assert_eq!(wrap_delta(400, 1_000, 0xFFFF), -600);
    }

    #[test]
    fn delta_across_32_bit_wrap() {
        assert_eq!(wrap_delta(3, u32::MAX - 2, u32::MAX), 6);
        assert_eq!(wrap_delta(u32::MAX - 2, 3, u32::MAX), -6);
    }

    #[test]
    fn position_keeps_counting_past_the_register() {
        let raw = Cell::new(65_000);
        let mut reader = EncoderReader::new(FakeCounter {
            raw: &raw,
            auto_reload: 0xFFFF,
        });
        for _ in 0..4 {
            raw.set(raw.get().wrapping_add(30_000) & 0xFFFF);
            reader.update();
        }
        assert_eq!(reader.position(), 120_000);
        assert_eq!(reader.delta(), 30_000);
    }

    #[test]
    fn task_publishes_and_honours_zero_request() {
        let raw = Cell::new(0);
        let mut position = Share::new(0i32);
        let mut delta = Share::new(0i32);
        let mut zero = Share::new(false);
        let (position_w, position_r) = position.split();
        let (delta_w, delta_r) = delta.split();
        let (zero_w, zero_r) = zero.split();

        let counter = FakeCounter {
            raw: &raw,
            auto_reload: 0xFFFF,
        };
        let link = EncoderLink {
            position: position_w,
            delta: delta_w,
            zero: zero_r,
        };
        let start = Instant::from_ticks(0);
        let mut task = EncoderTask::new(counter, link, EncoderConfig { period_us: 10 }, start);

        raw.set(250);
        task.run(Instant::from_ticks(5));
        assert_eq!(position_r.read(), 0, "not due yet");

        task.run(Instant::from_ticks(10));
        assert_eq!(position_r.read(), 250);
        assert_eq!(delta_r.read(), 250);

        zero_w.write(true);
        raw.set(300);
        task.run(Instant::from_ticks(20));
        assert_eq!(position_r.read(), 0);
        assert_eq!(delta_r.read(), 50);

        zero_w.write(false);
        raw.set(310);
        task.run(Instant::from_ticks(30));
        assert_eq!(position_r.read(), 10);
    }

    #[test]
    fn held_zero_request_zeroes_once() {
        let raw = Cell::new(100);
        let mut position = Share::new(0i32);
        let mut delta = Share::new(0i32);
        let mut zero = Share::new(false);
        let (position_w, position_r) = position.split();
        let (delta_w, _delta_r) = delta.split();
        let (zero_w, zero_r) = zero.split();

        let counter = FakeCounter {
            raw: &raw,
            auto_reload: 0xFFFF,
        };
        let link = EncoderLink {
            position: position_w,
            delta: delta_w,
            zero: zero_r,
        };
        let start = Instant::from_ticks(0);
        let mut task = EncoderTask::new(counter, link, EncoderConfig { period_us: 10 }, start);

        // Flag stays up for ten encoder periods while the shaft turns 900 counts.
        zero_w.write(true);
        for i in 1..=10u32 {
            task.run(Instant::from_ticks(i * 10));
            raw.set(100 + i * 90);
        }
        zero_w.write(false);
        task.run(Instant::from_ticks(110));
        assert_eq!(position_r.read(), 900);

        // A fresh request after the flag dropped zeroes again.
        zero_w.write(true);
        task.run(Instant::from_ticks(120));
        assert_eq!(position_r.read(), 0);
    }
}
