// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # MCU Peripherals
//!
//! Thin wrappers around the STM32F7 peripherals the firmware touches. Each one implements the
//! matching trait from the portable part of the crate, so the tasks never see the HAL.
//!
//! - [`usart`] - Serial console ([`Console`](crate::ui::Console)).
//! - [`encoder`] - TIM2/TIM3 quadrature counters ([`QuadratureCounter`](crate::encoder::QuadratureCounter)).
//! - [`clock`] - TIM5 microsecond task clock ([`Clock`](crate::sched::Clock)).
//! - [`pwm`] - TIM4 H-bridge PWM.
//! - [`pins`] - Board pin map.

pub mod clock;
pub mod encoder;
pub mod pins;
pub mod pwm;
pub mod usart;

pub use clock::MonoTimer;
pub use encoder::Encoder;
pub use pins::BoardPins;
pub use pwm::{Pwm4, PwmChannel};
pub use usart::Usart;
