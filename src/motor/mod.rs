// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Motor Driver Task
//!
//! Turns the UI's signed duty commands into H-bridge PWM levels and owns the fault latch.
//!
//! Fault protocol:
//! 1. The driver's fault input asserts. The task disables the bridges and writes
//!    `fault_found = true`.
//! 2. The UI sees the flag, drops `enable`, and waits for the operator.
//! 3. The operator clears the fault; the UI raises `enable` again.
//! 4. The task clears the latch only after it has seen `enable` low and then high. If the fault
//!    input is still asserted it latches again on the same tick.

use crate::channel::MotorChannel;
use crate::config::DriverConfig;
use crate::sched::{Deadline, Instant, Task};
use crate::sync::{Reader, Writer};

/// Duty commands are percentages in this range; anything outside is clamped.
pub const DUTY_LIMIT: f32 = 100.0;

/// Dual H-bridge motor driver with a shared fault output.
pub trait MotorDriver {
    /// Wake the output stage.
    fn enable(&mut self);

    /// Put the output stage to sleep (outputs coast).
    fn disable(&mut self);

    /// True while the driver reports a fault.
    fn fault_asserted(&mut self) -> bool;

    /// Drive one bridge. `in1` and `in2` are PWM fractions in [0.0, 1.0].
    fn set_bridge(&mut self, channel: MotorChannel, in1: f32, in2: f32);
}

/// Clamp a duty command to ±[`DUTY_LIMIT`]. NaN becomes 0.
pub fn clamp_duty(duty: f32) -> f32 {
    if duty.is_nan() {
        0.0
    } else {
        duty.clamp(-DUTY_LIMIT, DUTY_LIMIT)
    }
}

/// Map a signed duty percentage to (IN1, IN2) PWM fractions.
///
/// | duty | IN1 | IN2 |
/// | ---- | --- | --- |
/// | > 0 | duty | 0 |
/// | ≤ 0 | 0 | -duty |
pub fn bridge_levels(duty: f32) -> (f32, f32) {
    let fraction = clamp_duty(duty) / DUTY_LIMIT;
    if fraction > 0.0 {
        (fraction, 0.0)
    } else {
        (0.0, -fraction)
    }
}

/// Signals the driver task consumes and owns.
pub struct DriverLink<'a> {
    /// Indexed by [`MotorChannel::index`].
    pub duty: [Reader<'a, f32>; 2],
    pub enable: Reader<'a, bool>,
    pub fault: Writer<'a, bool>,
}

pub struct DriverTask<'a, D: MotorDriver> {
    driver: D,
    link: DriverLink<'a>,
    tick: Deadline,
    latched: bool,
    saw_disable: bool,
    outputs_on: bool,
}

impl<'a, D: MotorDriver> DriverTask<'a, D> {
    /// Starts with the output stage disabled until the first tick sees `enable`.
    pub fn new(mut driver: D, link: DriverLink<'a>, config: DriverConfig, start: Instant) -> Self {
        driver.disable();
        Self {
            driver,
            link,
            tick: Deadline::new(start, config.period_us),
            latched: false,
            saw_disable: false,
            outputs_on: false,
        }
    }

    #[inline]
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    #[inline]
    pub fn outputs_on(&self) -> bool {
        self.outputs_on
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn update_latch(&mut self, enable: bool) {
        if self.latched {
            if !enable {
                self.saw_disable = true;
            } else if self.saw_disable {
                self.latched = false;
                self.link.fault.write(false);
                crate::log_info!("driver: fault latch cleared");
            }
        }

        if !self.latched && self.driver.fault_asserted() {
            self.latched = true;
            self.saw_disable = !enable;
            self.link.fault.write(true);
            crate::log_warn!("driver: fault input asserted, outputs disabled");
        }
    }
}

impl<D: MotorDriver> Task for DriverTask<'_, D> {
    fn run(&mut self, now: Instant) {
        if !self.tick.poll(now) {
            return;
        }

        let enable = self.link.enable.read();
        self.update_latch(enable);

        let active = enable && !self.latched;
        if active != self.outputs_on {
            if active {
                self.driver.enable();
            } else {
                self.driver.disable();
            }
            self.outputs_on = active;
        }

        for channel in MotorChannel::ALL {
            let (in1, in2) = if active {
                bridge_levels(self.link.duty[channel.index()].read())
            } else {
                (0.0, 0.0)
            };
            self.driver.set_bridge(channel, in1, in2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::Share;
    use core::cell::Cell;

    #[derive(Default)]
    struct FakeDriver<'a> {
        fault_pin: Option<&'a Cell<bool>>,
        awake: bool,
        bridges: [(f32, f32); 2],
    }

    impl MotorDriver for FakeDriver<'_> {
        fn enable(&mut self) {
            self.awake = true;
        }
        fn disable(&mut self) {
            self.awake = false;
        }
        fn fault_asserted(&mut self) -> bool {
            self.fault_pin.map_or(false, Cell::get)
        }
        fn set_bridge(&mut self, channel: MotorChannel, in1: f32, in2: f32) {
            self.bridges[channel.index()] = (in1, in2);
        }
    }

    #[test]
    fn levels_follow_sign_and_clamp() {
        assert_eq!(bridge_levels(50.0), (0.5, 0.0));
        assert_eq!(bridge_levels(-25.0), (0.0, 0.25));
        assert_eq!(bridge_levels(0.0), (0.0, 0.0));
        assert_eq!(bridge_levels(250.0), (1.0, 0.0));
        assert_eq!(bridge_levels(-250.0), (0.0, 1.0));
        assert_eq!(bridge_levels(f32::NAN), (0.0, 0.0));
    }

    #[test]
    fn fault_latches_until_enable_is_cycled() {
        let fault_pin = Cell::new(false);
        let mut duty1 = Share::new(0.0f32);
        let mut duty2 = Share::new(0.0f32);
        let mut enable = Share::new(false);
        let mut fault = Share::new(false);
        let (duty1_w, duty1_r) = duty1.split();
        let (_duty2_w, duty2_r) = duty2.split();
        let (enable_w, enable_r) = enable.split();
        let (fault_w, fault_r) = fault.split();

        let driver = FakeDriver {
            fault_pin: Some(&fault_pin),
            ..FakeDriver::default()
        };
        let link = DriverLink {
            duty: [duty1_r, duty2_r],
            enable: enable_r,
            fault: fault_w,
        };
        let config = DriverConfig {
            period_us: 10,
            pwm_hz: 20_000,
        };
        let mut task = DriverTask::new(driver, link, config, Instant::from_ticks(0));
        let mut t = 0;
        let mut tick = |task: &mut DriverTask<'_, FakeDriver<'_>>| {
            t += 10;
            task.run(Instant::from_ticks(t));
        };

        enable_w.write(true);
        duty1_w.write(40.0);
        tick(&mut task);
        assert!(task.outputs_on());
        assert_eq!(task.driver().bridges[0], (0.4, 0.0));

        fault_pin.set(true);
        tick(&mut task);
        assert!(fault_r.read());
        assert!(!task.driver().awake);
        assert_eq!(task.driver().bridges[0], (0.0, 0.0));

        // Hardware recovers, but `enable` never dropped: the latch holds.
        fault_pin.set(false);
        tick(&mut task);
        assert!(task.is_latched());

        enable_w.write(false);
        tick(&mut task);
        assert!(task.is_latched());

        enable_w.write(true);
        tick(&mut task);
        assert!(!task.is_latched());
        assert!(!fault_r.read());
        assert!(task.driver().awake);
        assert_eq!(task.driver().bridges[0], (0.4, 0.0));
    }

    #[test]
    fn persistent_fault_relatches_on_clear() {
        let fault_pin = Cell::new(true);
        let mut duty1 = Share::new(0.0f32);
        let mut duty2 = Share::new(0.0f32);
        let mut enable = Share::new(false);
        let mut fault = Share::new(false);
        let (_d1, duty1_r) = duty1.split();
        let (_d2, duty2_r) = duty2.split();
        let (enable_w, enable_r) = enable.split();
        let (fault_w, fault_r) = fault.split();

        let driver = FakeDriver {
            fault_pin: Some(&fault_pin),
            ..FakeDriver::default()
        };
        let link = DriverLink {
            duty: [duty1_r, duty2_r],
            enable: enable_r,
            fault: fault_w,
        };
        let mut task = DriverTask::new(
            driver,
            link,
            DriverConfig {
                period_us: 1,
                pwm_hz: 20_000,
            },
            Instant::from_ticks(0),
        );

        task.run(Instant::from_ticks(1));
        assert!(fault_r.read());

        enable_w.write(true);
        task.run(Instant::from_ticks(2));
        assert!(task.is_latched());
        assert!(fault_r.read());
        assert!(!task.outputs_on());
    }
}
