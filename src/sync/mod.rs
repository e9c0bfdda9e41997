// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Inter-Task Data Exchange
//!
//! Tasks never call each other. Every signal that crosses a task boundary lives in its own
//! [`Share`], written by exactly one task and read by any number of others.
//!
//! ## Modules
//!
//! - [`share`] - Single-slot, last-write-wins cell plus its writer/reader handles.

pub mod share;

pub use share::{Reader, Share, Writer};
