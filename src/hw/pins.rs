// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 motor test stand.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiod, Alternate, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub usart1: Usart1Pins,
    pub encoder: EncoderPins,
    pub m1: Motor1Pins,
    pub m2: Motor2Pins,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// TIM2/TIM3 Quadrature Encoder Inputs
pub struct EncoderPins {
    // Motor 2
    pub tim2_ch1: gpioa::PA0<Alternate<1>>,
    pub tim2_ch2: gpioa::PA1<Alternate<1>>,

    // Motor 1
    pub tim3_ch1: gpioa::PA6<Alternate<2>>,
    pub tim3_ch2: gpioa::PA7<Alternate<2>>,
}

/// Motor 1 control pins
pub struct Motor1Pins {
    pub in1: gpiod::PD12<Alternate<2>>, // TIM4_CH1 (PWM)
    pub in2: gpiod::PD13<Alternate<2>>, // TIM4_CH2 (PWM)
    pub nsleep: gpioa::PA4<Output<PushPull>>,
    pub disable: gpioa::PA3<Output<PushPull>>,
    pub nfault: gpioa::PA2<Input<Floating>>,
}

/// Motor 2 control pins
pub struct Motor2Pins {
    pub in1: gpiod::PD14<Alternate<2>>, // TIM4_CH3 (PWM)
    pub in2: gpiod::PD15<Alternate<2>>, // TIM4_CH4 (PWM)
    pub nsleep: gpiod::PD2<Output<PushPull>>,
    pub disable: gpiod::PD1<Output<PushPull>>,
    pub nfault: gpiod::PD0<Input<Floating>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiod = gpiod.split();

        Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            encoder: EncoderPins {
                tim2_ch1: gpioa.pa0.into_alternate::<1>(),
                tim2_ch2: gpioa.pa1.into_alternate::<1>(),
                tim3_ch1: gpioa.pa6.into_alternate::<2>(),
                tim3_ch2: gpioa.pa7.into_alternate::<2>(),
            },

            m1: Motor1Pins {
                in1: gpiod.pd12.into_alternate::<2>(),
                in2: gpiod.pd13.into_alternate::<2>(),
                nsleep: gpioa.pa4.into_push_pull_output(),
                disable: gpioa.pa3.into_push_pull_output(),
                nfault: gpioa.pa2.into_floating_input(),
            },

            m2: Motor2Pins {
                in1: gpiod.pd14.into_alternate::<2>(),
                in2: gpiod.pd15.into_alternate::<2>(),
                nsleep: gpiod.pd2.into_push_pull_output(),
                disable: gpiod.pd1.into_push_pull_output(),
                nfault: gpiod.pd0.into_floating_input(),
            },
        }
    }
}
