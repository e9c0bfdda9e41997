// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Test stand firmware entry point.
//!
//! Brings up the console, encoders, task clock and H-bridges, connects the tasks through their
//! shared cells and hands control to the scheduler. Never returns.

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use dualdrive::{
    config::{DriverConfig, EncoderConfig, UiConfig, BAUD_RATE},
    drivers::{BridgeControl, DualBridge},
    encoder::{EncoderLink, EncoderTask},
    hw::{BoardPins, Encoder, MonoTimer, Pwm4, Usart},
    motor::{DriverLink, DriverTask},
    sched::{Clock, Scheduler, Task},
    sync::Share,
    ui::{ChannelLink, UiLinks, UserTask},
};

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOD);

    // USART1 (DBG)
    let usart_cfg = Config {
        baud_rate: BAUD_RATE.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART1, (pins.usart1.tx, pins.usart1.rx), &clocks, usart_cfg);
    let mut usart = Usart::new(serial);
    usart.println("");
    usart.println("dualdrive: booting");

    // Encoders: TIM3 for Motor 1, TIM2 for Motor 2
    let _encoder_pins = pins.encoder;
    let enc1 = Encoder::tim3(dp.TIM3);
    let enc2 = Encoder::tim2(dp.TIM2);

    // H-bridges
    let driver_cfg = DriverConfig::DEFAULT;
    let pwm = Pwm4::tim4(
        dp.TIM4,
        (pins.m1.in1, pins.m1.in2, pins.m2.in1, pins.m2.in2),
        &clocks,
        driver_cfg.pwm_hz,
    );
    let bridges = DualBridge::new(
        pwm,
        BridgeControl::new(pins.m1.nsleep, pins.m1.disable, pins.m1.nfault),
        BridgeControl::new(pins.m2.nsleep, pins.m2.disable, pins.m2.nfault),
    );

    let clock = MonoTimer::tim5(dp.TIM5, &clocks);

    // Shared cells
    let mut position1 = Share::new(0i32);
    let mut position2 = Share::new(0i32);
    let mut delta1 = Share::new(0i32);
    let mut delta2 = Share::new(0i32);
    let mut zero1 = Share::new(false);
    let mut zero2 = Share::new(false);
    let mut duty1 = Share::new(0.0f32);
    let mut duty2 = Share::new(0.0f32);
    let mut enable = Share::new(false);
    let mut fault_found = Share::new(false);

    let (position1_w, position1_r) = position1.split();
    let (position2_w, position2_r) = position2.split();
    let (delta1_w, delta1_r) = delta1.split();
    let (delta2_w, delta2_r) = delta2.split();
    let (zero1_w, zero1_r) = zero1.split();
    let (zero2_w, zero2_r) = zero2.split();
    let (duty1_w, duty1_r) = duty1.split();
    let (duty2_w, duty2_r) = duty2.split();
    let (enable_w, enable_r) = enable.split();
    let (fault_w, fault_r) = fault_found.split();

    // Tasks
    let start = clock.now();

    let ui_links = UiLinks {
        channels: [
            ChannelLink {
                position: position1_r,
                delta: delta1_r,
                zero: zero1_w,
                duty: duty1_w,
            },
            ChannelLink {
                position: position2_r,
                delta: delta2_r,
                zero: zero2_w,
                duty: duty2_w,
            },
        ],
        enable: enable_w,
        fault: fault_r,
    };
    let mut ui = UserTask::new(usart, ui_links, UiConfig::DEFAULT, start);

    let mut encoder1 = EncoderTask::new(
        enc1,
        EncoderLink {
            position: position1_w,
            delta: delta1_w,
            zero: zero1_r,
        },
        EncoderConfig::DEFAULT,
        start,
    );
    let mut encoder2 = EncoderTask::new(
        enc2,
        EncoderLink {
            position: position2_w,
            delta: delta2_w,
            zero: zero2_r,
        },
        EncoderConfig::DEFAULT,
        start,
    );

    let mut driver = DriverTask::new(
        bridges,
        DriverLink {
            duty: [duty1_r, duty2_r],
            enable: enable_r,
            fault: fault_w,
        },
        driver_cfg,
        start,
    );

    let tasks: [&mut dyn Task; 4] = [&mut ui, &mut encoder1, &mut encoder2, &mut driver];
    Scheduler::new(clock, tasks).run()
}
