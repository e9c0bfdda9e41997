// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Serial User Interface
//!
//! The user interface task reads one character at a time from the serial console and runs a
//! six-state machine:
//!
//! | State | Leaves on |
//! | ----- | --------- |
//! | [`UiState::Init`] | first tick, after printing the command menu |
//! | [`UiState::WaitForCommand`] | `g`/`G`, `m`/`M`, or a latched fault |
//! | [`UiState::CollectData`] | `s`/`S`, or a full sample log |
//! | [`UiState::PrintData`] | unconditionally, after printing the log |
//! | [`UiState::EnterDuty`] | CR or LF (into FAULT if one is latched) |
//! | [`UiState::Fault`] | `c`/`C` |
//!
//! Each state does a bounded amount of work per tick, so data collection and duty entry never
//! hold up the encoder and motor tasks.
//!
//! ## Modules
//!
//! - [`console`] - The `Console` trait (fmt output + non-blocking byte input).
//! - [`entry`] - Duty-cycle line editor.
//! - [`samples`] - Collection log and count → radian conversion.

pub mod console;
pub mod entry;
pub mod samples;

pub use console::Console;
pub use entry::{DutyEntry, EntryEvent};
pub use samples::{Sample, SampleLog, Scaling};

use core::fmt::Write;

use crate::channel::MotorChannel;
use crate::config::UiConfig;
use crate::sched::{Deadline, Instant, Task};
use crate::sync::{Reader, Writer};

const MENU: [&str; 16] = [
    " _______________________________________________________________ ",
    "| Commands                                                      |",
    "| z - Zero the position of Motor 1                              |",
    "| Z - Zero the position of Motor 2                              |",
    "| p - Print out the position of Motor 1                         |",
    "| P - Print out the position of Motor 2                         |",
    "| d - Print out the delta for Motor 1                           |",
    "| D - Print out the delta for Motor 2                           |",
    "| g - Collect Motor 1 data and print it                         |",
    "| G - Collect Motor 2 data and print it                         |",
    "| m - Enter a duty cycle for Motor 1                            |",
    "| M - Enter a duty cycle for Motor 2                            |",
    "| s - End data collection early                                 |",
    "| c - Clear a motor fault                                       |",
    "|                                                               |",
    "|_______________________________________________________________|",
];

/// Write one CRLF-terminated line to the console, ignoring write errors.
macro_rules! say {
    ($console:expr) => {{
        let _ = $console.write_str("\r\n");
    }};
    ($console:expr, $($arg:tt)*) => {{
        let _ = write!($console, $($arg)*);
        let _ = $console.write_str("\r\n");
    }};
}

/// UI state. States that act on one motor carry it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiState {
    Init,
    WaitForCommand,
    CollectData(MotorChannel),
    PrintData(MotorChannel),
    EnterDuty(MotorChannel),
    Fault,
}

impl UiState {
    pub fn name(&self) -> &'static str {
        match self {
            UiState::Init => "INIT",
            UiState::WaitForCommand => "WAIT_FOR_COMMAND",
            UiState::CollectData(_) => "COLLECT_DATA",
            UiState::PrintData(_) => "PRINT_DATA",
            UiState::EnterDuty(_) => "ENTER_DUTY",
            UiState::Fault => "FAULT",
        }
    }
}

/// Signals the UI exchanges with one motor/encoder pair.
pub struct ChannelLink<'a> {
    pub position: Reader<'a, i32>,
    pub delta: Reader<'a, i32>,
    pub zero: Writer<'a, bool>,
    pub duty: Writer<'a, f32>,
}

/// Every signal the UI task reads or owns.
pub struct UiLinks<'a> {
    /// Indexed by [`MotorChannel::index`].
    pub channels: [ChannelLink<'a>; 2],
    pub enable: Writer<'a, bool>,
    pub fault: Reader<'a, bool>,
}

pub struct UserTask<'a, C: Console> {
    console: C,
    links: UiLinks<'a>,
    scaling: Scaling,
    tick: Deadline,
    collect: Deadline,
    state: UiState,
    entry: DutyEntry,
    log: SampleLog,
}

impl<'a, C: Console> UserTask<'a, C> {
    /// Create the task in [`UiState::Init`]; the first tick is one period after `start`.
    pub fn new(console: C, links: UiLinks<'a>, config: UiConfig, start: Instant) -> Self {
        Self {
            console,
            links,
            scaling: Scaling::new(&config),
            tick: Deadline::new(start, config.period_us),
            collect: Deadline::new(start, config.collect_interval_us),
            state: UiState::Init,
            entry: DutyEntry::new(),
            log: SampleLog::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> UiState {
        self.state
    }

    /// Samples of the current collection session.
    #[inline]
    pub fn samples(&self) -> &SampleLog {
        &self.log
    }

    /// Duty-cycle keystrokes typed so far.
    #[inline]
    pub fn entry(&self) -> &DutyEntry {
        &self.entry
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    fn link(&self, channel: MotorChannel) -> &ChannelLink<'a> {
        &self.links.channels[channel.index()]
    }

    fn init(&mut self) -> UiState {
        for line in MENU {
            say!(self.console, "{}", line);
        }
        self.links.enable.write(true);
        UiState::WaitForCommand
    }

    fn wait_for_command(&mut self) -> UiState {
        // Zero requests are one-shot: the encoder task has seen them by now.
        for link in self.links.channels.iter() {
            if link.zero.read() {
                link.zero.write(false);
            }
        }

        if self.links.fault.read() {
            return self.enter_fault();
        }

        let Some(key) = self.console.read_byte() else {
            return UiState::WaitForCommand;
        };
        let channel = MotorChannel::from_case(key);
        let n = channel.number();

        match key {
            b'z' | b'Z' => {
                self.link(channel).zero.write(true);
                say!(self.console, "Zeroing position. Motor {} is now at 0.", n);
                crate::log_debug!("ui: zero request motor {}", n);
            }
            b'p' | b'P' => {
                let position = self.link(channel).position.read();
                say!(self.console, "Motor {} position is {}.", n, position);
            }
            b'd' | b'D' => {
                let delta = self.link(channel).delta.read();
                say!(self.console, "Motor {} delta is {}.", n, delta);
            }
            b'g' | b'G' => {
                self.log.reset();
                // First sample on the next UI tick, the rest on a fixed grid from there.
                self.collect.rearm(self.tick.next());
                say!(self.console, "Collecting data for Motor {}.", n);
                return UiState::CollectData(channel);
            }
            b'm' | b'M' => {
                self.entry.clear();
                say!(self.console, "Please enter duty cycle for motor {}:", n);
                return UiState::EnterDuty(channel);
            }
            _ => {}
        }
        UiState::WaitForCommand
    }

    fn collect_data(&mut self, channel: MotorChannel, now: Instant) -> UiState {
        if let Some(b's' | b'S') = self.console.read_byte() {
            say!(self.console, "End data collection.");
            return UiState::PrintData(channel);
        }

        if self.collect.poll(now) {
            let link = self.link(channel);
            let position = self.scaling.angle(link.position.read());
            let velocity = self.scaling.velocity(link.delta.read());
            self.log.record(position, velocity);

            if self.log.is_full() {
                say!(self.console, "End data collection.");
                return UiState::PrintData(channel);
            }
        }
        UiState::CollectData(channel)
    }

    fn print_data(&mut self, channel: MotorChannel) -> UiState {
        say!(self.console, "Printing data.");
        say!(
            self.console,
            "Motor {} over {} points:",
            channel.number(),
            self.log.len()
        );
        for sample in self.log.iter() {
            say!(
                self.console,
                "point {} position {} radians velocity {} rad/sec",
                sample.index,
                sample.position,
                sample.velocity
            );
        }
        self.log.reset();
        UiState::WaitForCommand
    }

    fn enter_duty(&mut self, channel: MotorChannel) -> UiState {
        let Some(key) = self.console.read_byte() else {
            return UiState::EnterDuty(channel);
        };

        match self.entry.push(key) {
            EntryEvent::Echo(key) => {
                let _ = self.console.write_char(key as char);
                UiState::EnterDuty(channel)
            }
            EntryEvent::Submit(_) if self.links.fault.read() => {
                self.entry.clear();
                say!(self.console);
                self.enter_fault()
            }
            EntryEvent::Submit(duty) => {
                self.link(channel).duty.write(duty);
                say!(self.console);
                say!(self.console, "Motor {} will run at {}", channel.number(), duty);
                crate::log_info!("ui: motor {} duty {}", channel.number(), duty);
                self.entry.clear();
                UiState::WaitForCommand
            }
            EntryEvent::Ignored => UiState::EnterDuty(channel),
        }
    }

    fn enter_fault(&mut self) -> UiState {
        self.links.enable.write(false);
        self.hold_zero_duty();
        say!(self.console, "Fault detected. Motors stopped. Press c to clear.");
        crate::log_warn!("ui: fault latched, holding zero duty");
        UiState::Fault
    }

    fn fault(&mut self) -> UiState {
        self.hold_zero_duty();

        if let Some(b'c' | b'C') = self.console.read_byte() {
            self.links.enable.write(true);
            say!(self.console, "Fault is cleared.");
            crate::log_info!("ui: fault cleared by operator");
            return UiState::WaitForCommand;
        }
        UiState::Fault
    }

    fn hold_zero_duty(&mut self) {
        for link in self.links.channels.iter() {
            link.duty.write(0.0);
        }
    }
}

impl<C: Console> Task for UserTask<'_, C> {
    fn run(&mut self, now: Instant) {
        if !self.tick.poll(now) {
            return;
        }

        let next = match self.state {
            UiState::Init => self.init(),
            UiState::WaitForCommand => self.wait_for_command(),
            UiState::CollectData(ch) => self.collect_data(ch, now),
            UiState::PrintData(ch) => self.print_data(ch),
            UiState::EnterDuty(ch) => self.enter_duty(ch),
            UiState::Fault => self.fault(),
        };

        if next != self.state {
            crate::log_debug!("ui: {} -> {}", self.state.name(), next.name());
            self.state = next;
        }
    }
}
