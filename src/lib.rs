//! Airlink - control/telemetry bridge for small RC vehicles
//!
//! Bridges a control source (gamepad, on-screen sliders, autonomous
//! policy) to a vehicle over a periodic, lossy UDP link. The core pieces:
//!
//! - [`protocol`]: fixed-layout little-endian wire records
//! - [`mixer`]: pluggable strategies mapping a control vector to actuators
//! - [`pipeline`]: ordered module registry running one per-cycle update
//! - [`link`]: UDP channel with independently scheduled send/receive loops
//!
//! Physics, rendering, input widgets and policy training live outside this
//! crate and talk to it through the actuator, sensor-source and control
//! input seams.

pub mod config;
pub mod control;
pub mod error;
pub mod link;
pub mod mixer;
pub mod modules;
pub mod pipeline;
pub mod protocol;
pub mod sim;
pub mod snapshot;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use link::UdpLink;
pub use pipeline::{DroneContext, DroneModule, Pipeline};
pub use protocol::{ControlCommand, TelemetryFrame};
