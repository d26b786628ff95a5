//! Virtual sensor readings module
//!
//! In a simulated scene there is no vehicle transmitting telemetry, so
//! this module plays the vehicle's part: once per tick it samples
//! scene-provided sensor sources and writes them into the telemetry
//! snapshot. Sources are opaque (raycast rigs, physics queries, noise
//! models); the module only converts units and packs the frame.

use crate::pipeline::{DroneContext, DroneModule};

/// Linear-acceleration source (scene accelerometer/gyro rig)
pub trait AccelSource: Send {
    /// Read the current acceleration vector
    fn read(&mut self) -> [f32; 3];
}

/// Distance sensor source
pub trait RangeSource: Send {
    /// Read the current distance in meters
    fn read(&mut self) -> f32;
}

/// Number of distance sensor slots in a telemetry frame
const DISTANCE_SLOTS: usize = 6;

/// Samples sensor sources into the telemetry snapshot
///
/// Missing sources are a valid scene configuration: an absent
/// accelerometer leaves the acceleration fields alone, an absent range
/// sensor reads as 0 cm. Negative distances clamp to zero; readings are
/// converted from meters to centimeters.
pub struct VirtualSensorsModule {
    accel: Option<Box<dyn AccelSource>>,
    ranges: Vec<Box<dyn RangeSource>>,
}

impl VirtualSensorsModule {
    pub fn new(accel: Option<Box<dyn AccelSource>>, ranges: Vec<Box<dyn RangeSource>>) -> Self {
        Self { accel, ranges }
    }
}

impl DroneModule for VirtualSensorsModule {
    fn name(&self) -> &'static str {
        "virtual-sensors"
    }

    fn init(&mut self, _ctx: &DroneContext) {
        if self.ranges.len() > DISTANCE_SLOTS {
            log::warn!(
                "virtual-sensors: {} range sources but only {} frame slots, extras ignored",
                self.ranges.len(),
                DISTANCE_SLOTS
            );
        }
    }

    fn tick(&mut self, ctx: &DroneContext) {
        let mut frame = ctx.telemetry.load();

        if let Some(accel) = self.accel.as_mut() {
            let [x, y, z] = accel.read();
            frame.linear_accel_x = x as i16;
            frame.linear_accel_y = y as i16;
            frame.linear_accel_z = z as i16;
        }

        for slot in 0..DISTANCE_SLOTS {
            let meters = match self.ranges.get_mut(slot) {
                Some(source) => source.read(),
                None => 0.0,
            };
            let centimeters = (meters * 100.0).clamp(0.0, u16::MAX as f32);
            frame.distance_sensors[slot] = centimeters as u16;
        }

        ctx.telemetry.store(frame);
    }
}
