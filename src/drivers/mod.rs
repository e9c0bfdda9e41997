// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application tasks.
//!
//! ## Existing drivers
//!
//! - [`dual_bridge`] – Two TI DRV8873 H-bridges in PWM mode, as a [`MotorDriver`](crate::motor::MotorDriver)

pub mod dual_bridge;

pub use dual_bridge::{BridgeControl, DualBridge};
