//! Differential-drive mixer for the airboat layout

use super::{ActuatorSink, Mixer};
use crate::protocol::ControlCommand;

/// Differential-drive ("airboat") mixer
///
/// Sign convention: positive yaw turns the vehicle left by speeding up the
/// right motor. Actuator index 0 is the left motor, index 1 the right:
///
/// ```text
/// left  = clamp(throttle - yaw, 0, 1000)
/// right = clamp(throttle + yaw, 0, 1000)
/// ```
///
/// Outputs are forward-only PWM values; reverse thrust is not part of this
/// layout.
pub struct AirBoatMixer {
    warned: bool,
}

impl AirBoatMixer {
    pub fn new() -> Self {
        Self { warned: false }
    }
}

impl Default for AirBoatMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixer for AirBoatMixer {
    fn name(&self) -> &'static str {
        "airboat"
    }

    fn mix(&mut self, command: &ControlCommand, actuators: &mut [Box<dyn ActuatorSink>]) {
        if actuators.len() < 2 {
            // Recoverable scene configuration, warn once and skip
            if !self.warned {
                log::warn!(
                    "airboat mixer needs 2 actuators, got {} - skipping actuation",
                    actuators.len()
                );
                self.warned = true;
            }
            return;
        }

        let throttle = command.throttle as i32;
        let yaw = command.yaw as i32;

        let left = (throttle - yaw).clamp(0, 1000) as i16;
        let right = (throttle + yaw).clamp(0, 1000) as i16;

        actuators[0].set_signal(left);
        actuators[1].set_signal(right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PwmMotor;

    fn motors() -> (Vec<Box<dyn ActuatorSink>>, PwmMotor, PwmMotor) {
        let left = PwmMotor::new("left");
        let right = PwmMotor::new("right");
        let sinks: Vec<Box<dyn ActuatorSink>> =
            vec![Box::new(left.clone()), Box::new(right.clone())];
        (sinks, left, right)
    }

    #[test]
    fn test_straight_ahead() {
        let (mut sinks, left, right) = motors();
        let mut mixer = AirBoatMixer::new();
        mixer.mix(
            &ControlCommand {
                throttle: 600,
                yaw: 0,
                pitch: 0,
                roll: 0,
            },
            &mut sinks,
        );
        assert_eq!(left.signal(), 600);
        assert_eq!(right.signal(), 600);
    }

    #[test]
    fn test_yaw_steers() {
        let (mut sinks, left, right) = motors();
        let mut mixer = AirBoatMixer::new();
        mixer.mix(
            &ControlCommand {
                throttle: 500,
                yaw: 300,
                pitch: 0,
                roll: 0,
            },
            &mut sinks,
        );
        assert_eq!(left.signal(), 200);
        assert_eq!(right.signal(), 800);
    }

    #[test]
    fn test_outputs_clamped() {
        let (mut sinks, left, right) = motors();
        let mut mixer = AirBoatMixer::new();

        // Saturating high
        mixer.mix(
            &ControlCommand {
                throttle: 1000,
                yaw: 1000,
                pitch: 0,
                roll: 0,
            },
            &mut sinks,
        );
        assert_eq!(left.signal(), 0);
        assert_eq!(right.signal(), 1000);

        // Extremes never leave [0, 1000]
        for (t, y) in [
            (i16::MAX, i16::MAX),
            (i16::MIN, i16::MIN),
            (i16::MAX, i16::MIN),
            (-1000, 0),
        ] {
            mixer.mix(
                &ControlCommand {
                    throttle: t,
                    yaw: y,
                    pitch: 0,
                    roll: 0,
                },
                &mut sinks,
            );
            assert!((0..=1000).contains(&left.signal()));
            assert!((0..=1000).contains(&right.signal()));
        }
    }

    #[test]
    fn test_missing_actuators_is_noop() {
        let solo = PwmMotor::new("solo");
        let mut sinks: Vec<Box<dyn ActuatorSink>> = vec![Box::new(solo.clone())];
        let mut mixer = AirBoatMixer::new();
        mixer.mix(
            &ControlCommand {
                throttle: 900,
                yaw: 0,
                pitch: 0,
                roll: 0,
            },
            &mut sinks,
        );
        // No signal applied, no panic
        assert_eq!(solo.signal(), 0);

        let mut empty: Vec<Box<dyn ActuatorSink>> = Vec::new();
        mixer.mix(&ControlCommand::default(), &mut empty);
    }
}
