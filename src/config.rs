// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Firmware configuration.
//!
//! All times are in microseconds of the free-running task clock.

/// Encoder counts per output shaft revolution (1000 line encoder, 4x quadrature).
pub const COUNTS_PER_REV: u32 = 4000;

/// Divisor applied to the UI period when converting an encoder delta into a velocity.
pub const DELTA_RANGE: f32 = 65_535.3;

/// Most samples kept by one data-collection session.
pub const SAMPLE_CAP: usize = 65;

/// Most keystrokes held by the duty-cycle entry buffer.
pub const DUTY_ENTRY_LEN: usize = 12;

/// Serial console baud rate.
pub const BAUD_RATE: u32 = 115_200;

/// User interface task settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UiConfig {
    /// Outer task period.
    pub period_us: u32,
    /// Sampling interval while collecting data.
    pub collect_interval_us: u32,
    pub counts_per_rev: u32,
    pub delta_range: f32,
}

impl UiConfig {
    pub const DEFAULT: Self = Self {
        period_us: 100_000,
        collect_interval_us: 500_000,
        counts_per_rev: COUNTS_PER_REV,
        delta_range: DELTA_RANGE,
    };
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Encoder task settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    pub period_us: u32,
}

impl EncoderConfig {
    pub const DEFAULT: Self = Self { period_us: 10_000 };
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Motor driver task settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    pub period_us: u32,
    /// H-bridge PWM carrier frequency.
    pub pwm_hz: u32,
}

impl DriverConfig {
    pub const DEFAULT: Self = Self {
        period_us: 10_000,
        pwm_hz: 20_000,
    };
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
