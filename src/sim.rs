//! Simulated actuators and sensor sources
//!
//! Stand-ins for scene-provided hardware so the full pipeline runs without
//! a vehicle attached: motors that record their last PWM signal, and sensor
//! sources with optional Gaussian noise. Physics stays outside the core;
//! these only shape plausible values.

use crate::mixer::ActuatorSink;
use crate::modules::sensors::{AccelSource, RangeSource};
use parking_lot::Mutex;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;
use std::sync::Arc;

/// Simulated DC motor holding the last applied PWM signal
#[derive(Clone)]
pub struct PwmMotor {
    name: String,
    signal: Arc<Mutex<i16>>,
}

impl PwmMotor {
    /// Create a new motor with a zero signal
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signal: Arc::new(Mutex::new(0)),
        }
    }

    /// Last signal applied by a mixer
    pub fn signal(&self) -> i16 {
        *self.signal.lock()
    }
}

impl ActuatorSink for PwmMotor {
    fn set_signal(&mut self, value: i16) {
        *self.signal.lock() = value;
        log::trace!("motor {}: signal {}", self.name, value);
    }
}

/// Gaussian noise source with deterministic seeding
///
/// Seed 0 draws entropy for a different sequence each run.
struct NoiseGen {
    rng: SmallRng,
}

impl NoiseGen {
    fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng }
    }

    fn gaussian(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        let n: f32 = self.rng.sample(StandardNormal);
        n * stddev
    }
}

/// Accelerometer source producing a fixed vector plus Gaussian noise
pub struct NoisyAccelerometer {
    base: [f32; 3],
    stddev: f32,
    noise: NoiseGen,
}

impl NoisyAccelerometer {
    pub fn new(base: [f32; 3], stddev: f32, seed: u64) -> Self {
        Self {
            base,
            stddev,
            noise: NoiseGen::new(seed),
        }
    }
}

impl AccelSource for NoisyAccelerometer {
    fn read(&mut self) -> [f32; 3] {
        [
            self.base[0] + self.noise.gaussian(self.stddev),
            self.base[1] + self.noise.gaussian(self.stddev),
            self.base[2] + self.noise.gaussian(self.stddev),
        ]
    }
}

/// Range sensor source returning a fixed distance in meters
pub struct FixedRangeSensor {
    distance_m: f32,
}

impl FixedRangeSensor {
    pub fn new(distance_m: f32) -> Self {
        Self { distance_m }
    }
}

impl RangeSource for FixedRangeSensor {
    fn read(&mut self) -> f32 {
        self.distance_m
    }
}
