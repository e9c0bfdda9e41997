// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # DualDrive Firmware
//!
//! Cooperative firmware for a two-motor, two-encoder test stand, written in Rust, targeting an
//! STM32F777 MCU. A single super-loop polls a fixed set of periodic tasks; tasks exchange data only
//! through single-slot [`sync::Share`] cells, and an operator drives everything from a serial
//! terminal with one-letter commands.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`sync`] | Single-writer shared cells used between tasks |
//! | [`sched`] | Wrapping microsecond time, deadlines, the `Task` trait and the super-loop scheduler |
//! | [`ui`] | Serial user interface task (command dispatch, duty entry, data collection, fault latch) |
//! | [`encoder`] | Quadrature encoder sampling task |
//! | [`motor`] | Motor driver task (duty → H-bridge, fault latch) |
//! | [`config`] | Periods, conversion constants and buffer sizes |
//! | `hw` | MCU-level wrappers around USART and timers (feature `board`) |
//! | `drivers` | Device-level drivers for the H-bridges (feature `board`) |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod logging;

pub mod channel;
pub mod config;
pub mod encoder;
pub mod motor;
pub mod sched;
pub mod sync;
pub mod ui;

#[cfg(feature = "board")]
pub mod drivers;
#[cfg(feature = "board")]
pub mod hw;

pub use channel::MotorChannel;
pub use sched::{Clock, Deadline, Instant, Scheduler, Task};
pub use sync::{Reader, Share, Writer};
