// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two DRV8873 H-bridges driven in PWM mode from TIM4.
//!
//! Each bridge has three control lines besides its PWM inputs:
//! - `nSLEEP` (output, high = awake)
//! - `DISABLE` (output, high = outputs Hi-Z)
//! - `nFAULT` (open-drain input, low = fault)
//!
//! A fault on either bridge is reported as a fault of the pair; the driver task stops both.

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::channel::MotorChannel;
use crate::hw::{Pwm4, PwmChannel};
use crate::motor::MotorDriver;

/// Control lines of one bridge.
pub struct BridgeControl<SLP, DIS, FLT> {
    nsleep: SLP,
    disable: DIS,
    nfault: FLT,
}

impl<SLP, DIS, FLT> BridgeControl<SLP, DIS, FLT>
where
    SLP: OutputPin,
    DIS: OutputPin,
    FLT: InputPin,
{
    /// Takes the lines and parks the bridge asleep with outputs disabled.
    pub fn new(nsleep: SLP, disable: DIS, nfault: FLT) -> Self {
        let mut bridge = Self {
            nsleep,
            disable,
            nfault,
        };
        bridge.sleep();
        bridge
    }

    pub fn wake(&mut self) {
        self.nsleep.set_high().ok();
        self.disable.set_low().ok();
    }

    pub fn sleep(&mut self) {
        self.disable.set_high().ok();
        self.nsleep.set_low().ok();
    }

    #[inline]
    pub fn fault(&self) -> bool {
        matches!(self.nfault.is_low(), Ok(true))
    }
}

pub struct DualBridge<S1, D1, F1, S2, D2, F2> {
    pwm: Pwm4,
    m1: BridgeControl<S1, D1, F1>,
    m2: BridgeControl<S2, D2, F2>,
}

impl<S1, D1, F1, S2, D2, F2> DualBridge<S1, D1, F1, S2, D2, F2>
where
    S1: OutputPin,
    D1: OutputPin,
    F1: InputPin,
    S2: OutputPin,
    D2: OutputPin,
    F2: InputPin,
{
    pub fn new(pwm: Pwm4, m1: BridgeControl<S1, D1, F1>, m2: BridgeControl<S2, D2, F2>) -> Self {
        let mut pair = Self { pwm, m1, m2 };
        for channel in MotorChannel::ALL {
            pair.set_bridge(channel, 0.0, 0.0);
        }
        pair
    }

    #[inline]
    fn pwm_channels(channel: MotorChannel) -> (PwmChannel, PwmChannel) {
        match channel {
            MotorChannel::One => (PwmChannel::C1, PwmChannel::C2),
            MotorChannel::Two => (PwmChannel::C3, PwmChannel::C4),
        }
    }
}

impl<S1, D1, F1, S2, D2, F2> MotorDriver for DualBridge<S1, D1, F1, S2, D2, F2>
where
    S1: OutputPin,
    D1: OutputPin,
    F1: InputPin,
    S2: OutputPin,
    D2: OutputPin,
    F2: InputPin,
{
    fn enable(&mut self) {
        self.m1.wake();
        self.m2.wake();
    }

    fn disable(&mut self) {
        self.m1.sleep();
        self.m2.sleep();
    }

    fn fault_asserted(&mut self) -> bool {
        self.m1.fault() || self.m2.fault()
    }

    fn set_bridge(&mut self, channel: MotorChannel, in1: f32, in2: f32) {
        let (c1, c2) = Self::pwm_channels(channel);
        self.pwm.set_fraction(c1, in1);
        self.pwm.set_fraction(c2, in2);
    }
}
