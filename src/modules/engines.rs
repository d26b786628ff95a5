//! Mixer-driving actuator module

use crate::mixer::{ActuatorSink, Mixer};
use crate::pipeline::{DroneContext, DroneModule};

/// Feeds the current control snapshot through a mixer into actuator sinks
///
/// The mixer strategy and actuator layout come from the scene; this module
/// only sequences them into the tick. An under-populated actuator array is
/// the mixer's problem to warn about, not a pipeline failure.
pub struct EngineModule {
    mixer: Box<dyn Mixer>,
    actuators: Vec<Box<dyn ActuatorSink>>,
}

impl EngineModule {
    pub fn new(mixer: Box<dyn Mixer>, actuators: Vec<Box<dyn ActuatorSink>>) -> Self {
        Self { mixer, actuators }
    }
}

impl DroneModule for EngineModule {
    fn name(&self) -> &'static str {
        "engines"
    }

    fn init(&mut self, _ctx: &DroneContext) {
        log::info!(
            "engines: {} mixer, {} actuators",
            self.mixer.name(),
            self.actuators.len()
        );
    }

    fn tick(&mut self, ctx: &DroneContext) {
        let command = ctx.control.load();
        self.mixer.mix(&command, &mut self.actuators);
    }

    fn shutdown(&mut self) {
        // Leave nothing spinning
        for actuator in &mut self.actuators {
            actuator.set_signal(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixer::AirBoatMixer;
    use crate::protocol::ControlCommand;
    use crate::sim::PwmMotor;

    #[test]
    fn test_drives_motors_from_snapshot() {
        let left = PwmMotor::new("left");
        let right = PwmMotor::new("right");
        let actuators: Vec<Box<dyn ActuatorSink>> =
            vec![Box::new(left.clone()), Box::new(right.clone())];

        let ctx = DroneContext::new();
        let mut module = EngineModule::new(Box::new(AirBoatMixer::new()), actuators);
        module.init(&ctx);

        ctx.control.store(ControlCommand {
            throttle: 400,
            yaw: 100,
            pitch: 0,
            roll: 0,
        });
        module.tick(&ctx);

        assert_eq!(left.signal(), 300);
        assert_eq!(right.signal(), 500);

        module.shutdown();
        assert_eq!(left.signal(), 0);
        assert_eq!(right.signal(), 0);
    }

    #[test]
    fn test_no_actuators_is_harmless() {
        let ctx = DroneContext::new();
        let mut module = EngineModule::new(Box::new(AirBoatMixer::new()), Vec::new());
        module.init(&ctx);
        ctx.control.store(ControlCommand {
            throttle: 1000,
            yaw: 0,
            pitch: 0,
            roll: 0,
        });
        // Must not panic; mixer skips actuation
        module.tick(&ctx);
        module.shutdown();
    }
}
