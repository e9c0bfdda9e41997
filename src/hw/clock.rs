// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Task clock: TIM5 as a free-running 1 MHz, 32-bit up-counter.
//!
//! One tick per microsecond, wrapping every 2^32 µs (about 71.6 minutes). Deadlines compare
//! instants with wrapping arithmetic, so the wrap is invisible to the tasks.

use stm32f7xx_hal::{pac, rcc::Clocks};

use crate::sched::{Clock, Instant};

const TICK_HZ: u32 = 1_000_000;

pub struct MonoTimer {
    tim: pac::TIM5,
}

impl MonoTimer {
    /// Enable TIM5 and start counting microseconds from zero.
    #[allow(unused_unsafe)]
    pub fn tim5(tim: pac::TIM5, clocks: &Clocks) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim5en().set_bit());

        let psc = clocks.timclk1().raw() / TICK_HZ - 1;

        tim.cr1.modify(|_, w| w.cen().clear_bit());
        tim.psc.write(|w| unsafe { w.bits(psc) });
        tim.arr.write(|w| unsafe { w.bits(0xFFFF_FFFF) });

        // Latch the prescaler now instead of at the first overflow
        tim.egr.write(|w| w.ug().set_bit());
        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }
}

impl Clock for MonoTimer {
    #[inline]
    fn now(&self) -> Instant {
        Instant::from_ticks(self.tim.cnt.read().bits())
    }
}
