// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Four-channel edge-aligned PWM on TIM4 (PD12..PD15).
//!
//! | Channel | Pin | Bridge input |
//! | ------- | --- | ------------ |
//! | CH1 | PD12 | Motor 1 IN1 |
//! | CH2 | PD13 | Motor 1 IN2 |
//! | CH3 | PD14 | Motor 2 IN1 |
//! | CH4 | PD15 | Motor 2 IN2 |

use stm32f7xx_hal::{
    gpio::{gpiod, Alternate},
    pac,
    rcc::Clocks,
};

/// PWM mode 1 with preload, for both channels of one CCMR register.
const CCMR_PWM1_PRELOAD: u32 = (0b110 << 4) | (1 << 3) | (0b110 << 12) | (1 << 11);

/// CC1E..CC4E, active high.
const CCER_ALL_ENABLED: u32 = (1 << 0) | (1 << 4) | (1 << 8) | (1 << 12);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PwmChannel {
    C1,
    C2,
    C3,
    C4,
}

pub type Tim4Pins = (
    gpiod::PD12<Alternate<2>>,
    gpiod::PD13<Alternate<2>>,
    gpiod::PD14<Alternate<2>>,
    gpiod::PD15<Alternate<2>>,
);

pub struct Pwm4 {
    tim: pac::TIM4,
    _pins: Tim4Pins,
    top: u32,
}

impl Pwm4 {
    /// Start TIM4 at `pwm_hz` with every channel at 0 %.
    #[allow(unused_unsafe)]
    pub fn tim4(tim: pac::TIM4, pins: Tim4Pins, clocks: &Clocks, pwm_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let top = (clocks.timclk1().raw() / pwm_hz).clamp(2, 0x1_0000) - 1;

        tim.cr1.modify(|_, w| w.cen().clear_bit());
        tim.psc.write(|w| unsafe { w.bits(0) });
        tim.arr.write(|w| unsafe { w.bits(top) });

        tim.ccr1.write(|w| unsafe { w.bits(0) });
        tim.ccr2.write(|w| unsafe { w.bits(0) });
        tim.ccr3.write(|w| unsafe { w.bits(0) });
        tim.ccr4.write(|w| unsafe { w.bits(0) });

        tim.ccmr1_output().write(|w| unsafe { w.bits(CCMR_PWM1_PRELOAD) });
        tim.ccmr2_output().write(|w| unsafe { w.bits(CCMR_PWM1_PRELOAD) });
        tim.ccer.write(|w| unsafe { w.bits(CCER_ALL_ENABLED) });

        // Load ARR/CCR preloads, then run with auto-reload preload
        tim.egr.write(|w| w.ug().set_bit());
        tim.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());

        Self {
            tim,
            _pins: pins,
            top,
        }
    }

    /// Compare value for 100 %.
    #[inline]
    pub fn max_duty(&self) -> u32 {
        self.top + 1
    }

    /// Set a channel's on-time as a fraction of the period. Clamped to [0.0, 1.0].
    pub fn set_fraction(&mut self, channel: PwmChannel, fraction: f32) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let ccr = (fraction * self.max_duty() as f32) as u32;
        self.set_compare(channel, ccr);
    }

    #[allow(unused_unsafe)]
    fn set_compare(&mut self, channel: PwmChannel, ccr: u32) {
        let ccr = ccr.min(self.max_duty());
        match channel {
            PwmChannel::C1 => self.tim.ccr1.write(|w| unsafe { w.bits(ccr) }),
            PwmChannel::C2 => self.tim.ccr2.write(|w| unsafe { w.bits(ccr) }),
            PwmChannel::C3 => self.tim.ccr3.write(|w| unsafe { w.bits(ccr) }),
            PwmChannel::C4 => self.tim.ccr4.write(|w| unsafe { w.bits(ccr) }),
        }
    }
}
