// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Quadrature encoder inputs via STM32F7 timers in encoder mode.
//!
//! TIM3 counts Motor 1's encoder in 16 bits, TIM2 counts Motor 2's in 32 bits. Both count on every
//! edge of both channels (encoder mode 3), so a 1000-line encoder gives 4000 counts per turn.
//! Neither is ever reset; the encoder task handles the wrap.

use stm32f7xx_hal::pac;

use crate::encoder::QuadratureCounter;

pub struct Encoder<TIM> {
    tim: TIM,
}

macro_rules! quadrature_timer {
    ($TIM:ident, $ctor:ident, $timen:ident, $top:expr) => {
        impl Encoder<pac::$TIM> {
            /// Enable the timer clock and configure it as a free-running quadrature counter.
            #[allow(unused_unsafe)]
            pub fn $ctor(tim: pac::$TIM) -> Self {
                let rcc = unsafe { &*pac::RCC::ptr() };
                rcc.apb1enr.modify(|_, w| w.$timen().set_bit());

                // Disable counter while configuring
                tim.cr1.modify(|_, w| w.cen().clear_bit());

                tim.arr.write(|w| unsafe { w.bits($top) });

                // Slave mode: encoder mode 3 (count on both TI1 and TI2)
                tim.smcr.modify(|_, w| w.sms().bits(0b011));

                // CH1/CH2 as inputs from TI1/TI2, non-inverted
                tim.ccmr1_input().modify(|_, w| w.cc1s().ti1().cc2s().ti2());
                tim.ccer.modify(|_, w| {
                    w.cc1p()
                        .clear_bit()
                        .cc2p()
                        .clear_bit()
                        .cc1e()
                        .set_bit()
                        .cc2e()
                        .set_bit()
                });

                tim.cnt.write(|w| unsafe { w.bits(0) });
                tim.cr1.modify(|_, w| w.cen().set_bit());

                Self { tim }
            }
        }

        impl QuadratureCounter for Encoder<pac::$TIM> {
            #[inline]
            fn count(&self) -> u32 {
                u32::from(self.tim.cnt.read().cnt().bits())
            }

            #[inline]
            fn auto_reload(&self) -> u32 {
                $top
            }
        }
    };
}

quadrature_timer!(TIM2, tim2, tim2en, 0xFFFF_FFFF);
quadrature_timer!(TIM3, tim3, tim3en, 0xFFFF);
