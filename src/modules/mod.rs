//! Concrete pipeline modules
//!
//! Each module is one capability slot in the per-cycle update: producing
//! the control command, driving actuators through the mixer, filling the
//! telemetry snapshot from scene sensors, or holding the transport link's
//! place in the tick order.

mod comms;
mod controller;
mod engines;
pub mod sensors;

pub use comms::LinkModule;
pub use controller::ControllerModule;
pub use engines::EngineModule;
pub use sensors::VirtualSensorsModule;
