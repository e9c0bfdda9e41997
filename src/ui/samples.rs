// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Data-collection log and encoder unit conversion.

use core::f32::consts::PI;

use heapless::Vec;

use crate::config::{UiConfig, SAMPLE_CAP};

/// One collected point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// 1-based running index within the session.
    pub index: u16,
    /// Shaft angle in radians.
    pub position: f32,
    pub velocity: f32,
}

/// Bounded log of one collection session.
#[derive(Clone, Debug)]
pub struct SampleLog {
    samples: Vec<Sample, SAMPLE_CAP>,
    next_index: u16,
}

impl SampleLog {
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
            next_index: 1,
        }
    }

    /// Drop every sample and restart numbering at 1.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.next_index = 1;
    }

    /// Append a point under the next index. Returns `false`, storing nothing, when full.
    pub fn record(&mut self, position: f32, velocity: f32) -> bool {
        let sample = Sample {
            index: self.next_index,
            position,
            velocity,
        };
        if self.samples.push(sample).is_err() {
            return false;
        }
        self.next_index += 1;
        true
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index the next recorded sample will get.
    #[inline]
    pub fn next_index(&self) -> u16 {
        self.next_index
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

impl Default for SampleLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Encoder count → physical unit conversion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scaling {
    rad_per_count: f32,
    velocity_per_count: f32,
}

impl Scaling {
    pub fn new(config: &UiConfig) -> Self {
        let rad_per_count = 2.0 * PI / config.counts_per_rev as f32;
        Self {
            rad_per_count,
            velocity_per_count: rad_per_count * (config.period_us as f32 / config.delta_range),
        }
    }

    /// Encoder position → radians.
    #[inline]
    pub fn angle(&self, counts: i32) -> f32 {
        counts as f32 * self.rad_per_count
    }

    /// Encoder delta → rad/sec.
    #[inline]
    pub fn velocity(&self, delta: i32) -> f32 {
        delta as f32 * self.velocity_per_count
    }
}
