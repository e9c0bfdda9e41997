// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;

use dualdrive::sched::{Clock, Instant};
use dualdrive::sync::{Reader, Share, Writer};
use dualdrive::ui::{ChannelLink, Console, UiLinks};

/// Console with scripted input and captured output.
#[derive(Default)]
pub struct TestConsole {
    input: VecDeque<u8>,
    output: String,
}

impl TestConsole {
    pub fn feed(&mut self, keys: &str) {
        self.input.extend(keys.bytes());
    }

    pub fn pending(&self) -> usize {
        self.input.len()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Return everything written so far and start a fresh capture.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl fmt::Write for TestConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.push_str(s);
        Ok(())
    }
}

impl Console for TestConsole {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }
}

/// Clock that advances by a fixed step on every read.
pub struct SteppingClock {
    now: Cell<u32>,
    step: u32,
}

impl SteppingClock {
    pub fn new(start: u32, step: u32) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }

    pub fn peek(&self) -> Instant {
        Instant::from_ticks(self.now.get())
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Instant {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));
        Instant::from_ticks(now)
    }
}

/// Every cell the user interface task touches.
#[derive(Default)]
pub struct UiSignals {
    pub position: [Share<i32>; 2],
    pub delta: [Share<i32>; 2],
    pub zero: [Share<bool>; 2],
    pub duty: [Share<f32>; 2],
    pub enable: Share<bool>,
    pub fault: Share<bool>,
}

/// The other side of the UI's links, held by the test.
pub struct UiProbes<'a> {
    pub position: [Writer<'a, i32>; 2],
    pub delta: [Writer<'a, i32>; 2],
    pub zero: [Reader<'a, bool>; 2],
    pub duty: [Reader<'a, f32>; 2],
    pub enable: Reader<'a, bool>,
    pub fault: Writer<'a, bool>,
}

impl UiSignals {
    pub fn split(&mut self) -> (UiLinks<'_>, UiProbes<'_>) {
        let [position1, position2] = &mut self.position;
        let [delta1, delta2] = &mut self.delta;
        let [zero1, zero2] = &mut self.zero;
        let [duty1, duty2] = &mut self.duty;

        let (position1_w, position1_r) = position1.split();
        let (position2_w, position2_r) = position2.split();
        let (delta1_w, delta1_r) = delta1.split();
        let (delta2_w, delta2_r) = delta2.split();
        let (zero1_w, zero1_r) = zero1.split();
        let (zero2_w, zero2_r) = zero2.split();
        let (duty1_w, duty1_r) = duty1.split();
        let (duty2_w, duty2_r) = duty2.split();
        let (enable_w, enable_r) = self.enable.split();
        let (fault_w, fault_r) = self.fault.split();

        let links = UiLinks {
            channels: [
                ChannelLink {
                    position: position1_r,
                    delta: delta1_r,
                    zero: zero1_w,
                    duty: duty1_w,
                },
                ChannelLink {
                    position: position2_r,
                    delta: delta2_r,
                    zero: zero2_w,
                    duty: duty2_w,
                },
            ],
            enable: enable_w,
            fault: fault_r,
        };
        let probes = UiProbes {
            position: [position1_w, position2_w],
            delta: [delta1_w, delta2_w],
            zero: [zero1_r, zero2_r],
            duty: [duty1_r, duty2_r],
            enable: enable_r,
            fault: fault_w,
        };
        (links, probes)
    }
}

/// Lines of `text` starting with `prefix`.
pub fn count_lines(text: &str, prefix: &str) -> usize {
    text.split("\r\n").filter(|l| l.starts_with(prefix)).count()
}
