//! Mixer strategies mapping a control command onto actuator signals
//!
//! A mixer knows a vehicle's physical layout; the pipeline and transport do
//! not. Swapping an airboat for a bicopter means swapping the mixer, not
//! touching anything upstream. Strategies are selected by name from
//! configuration via [`create_mixer`].

mod airboat;
mod direct;

pub use airboat::AirBoatMixer;
pub use direct::DirectMixer;

use crate::error::{Error, Result};
use crate::protocol::ControlCommand;

/// Sink for one physical or simulated actuator signal
///
/// Implementations live outside the core (PWM drivers, sim motors); the
/// mixer only pushes signed signal values into them.
pub trait ActuatorSink: Send {
    /// Apply a signal value (mixer-specific range, typically ±1000)
    fn set_signal(&mut self, value: i16);
}

/// Mixer strategy: pure with respect to the command, side-effecting only
/// through the actuator sinks
pub trait Mixer: Send {
    /// Strategy name (for logs)
    fn name(&self) -> &'static str;

    /// Map `command` onto `actuators`
    ///
    /// An under-populated actuator array is a valid scene configuration:
    /// the mixer must skip actuation and warn, never panic.
    fn mix(&mut self, command: &ControlCommand, actuators: &mut [Box<dyn ActuatorSink>]);
}

/// Create a mixer strategy by configuration name
pub fn create_mixer(name: &str) -> Result<Box<dyn Mixer>> {
    match name {
        "airboat" => Ok(Box::new(AirBoatMixer::new())),
        "direct" => Ok(Box::new(DirectMixer::new())),
        _ => Err(Error::UnknownMixer(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_known_mixers() {
        assert_eq!(create_mixer("airboat").unwrap().name(), "airboat");
        assert_eq!(create_mixer("direct").unwrap().name(), "direct");
    }

    #[test]
    fn test_create_unknown_mixer() {
        assert!(matches!(
            create_mixer("hexacopter"),
            Err(Error::UnknownMixer(_))
        ));
    }
}
