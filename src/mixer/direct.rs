//! Four-axis passthrough mixer

use super::{ActuatorSink, Mixer};
use crate::protocol::{AXIS_SCALE, ControlCommand};

/// Direct mixer: throttle/yaw/pitch/roll drive actuators 0..4 unmodified,
/// clamped to ±1000
///
/// Useful for layouts where the vehicle firmware does its own mixing
/// (bicopter servos, test rigs) and the ground side only forwards axes.
pub struct DirectMixer {
    warned: bool,
}

impl DirectMixer {
    pub fn new() -> Self {
        Self { warned: false }
    }
}

impl Default for DirectMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixer for DirectMixer {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn mix(&mut self, command: &ControlCommand, actuators: &mut [Box<dyn ActuatorSink>]) {
        if actuators.len() < 4 {
            if !self.warned {
                log::warn!(
                    "direct mixer needs 4 actuators, got {} - skipping actuation",
                    actuators.len()
                );
                self.warned = true;
            }
            return;
        }

        let limit = AXIS_SCALE;
        actuators[0].set_signal(command.throttle.clamp(-limit, limit));
        actuators[1].set_signal(command.yaw.clamp(-limit, limit));
        actuators[2].set_signal(command.pitch.clamp(-limit, limit));
        actuators[3].set_signal(command.roll.clamp(-limit, limit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PwmMotor;

    #[test]
    fn test_axes_pass_through() {
        let motors: Vec<PwmMotor> = (0..4).map(|i| PwmMotor::new(format!("m{i}"))).collect();
        let mut sinks: Vec<Box<dyn ActuatorSink>> = motors
            .iter()
            .map(|m| Box::new(m.clone()) as Box<dyn ActuatorSink>)
            .collect();

        let mut mixer = DirectMixer::new();
        mixer.mix(
            &ControlCommand {
                throttle: 100,
                yaw: -200,
                pitch: i16::MAX,
                roll: i16::MIN,
            },
            &mut sinks,
        );

        assert_eq!(motors[0].signal(), 100);
        assert_eq!(motors[1].signal(), -200);
        assert_eq!(motors[2].signal(), 1000);
        assert_eq!(motors[3].signal(), -1000);
    }

    #[test]
    fn test_too_few_actuators_is_noop() {
        let m = PwmMotor::new("m0");
        let mut sinks: Vec<Box<dyn ActuatorSink>> = vec![Box::new(m.clone())];
        let mut mixer = DirectMixer::new();
        mixer.mix(
            &ControlCommand {
                throttle: 500,
                yaw: 0,
                pitch: 0,
                roll: 0,
            },
            &mut sinks,
        );
        assert_eq!(m.signal(), 0);
    }
}
