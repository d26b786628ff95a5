//! Control command producer

use crate::control::ControlInputs;
use crate::pipeline::{DroneContext, DroneModule};

/// Publishes the merged control inputs into the control snapshot
///
/// This is the single authoritative writer of the control command: once per
/// tick it replaces the snapshot with the merged, wire-scaled value.
/// Input glue (gamepad callbacks, on-screen sliders) writes into the shared
/// [`ControlInputs`] handle from whatever thread delivers its events.
pub struct ControllerModule {
    inputs: ControlInputs,
}

impl ControllerModule {
    pub fn new(inputs: ControlInputs) -> Self {
        Self { inputs }
    }
}

impl DroneModule for ControllerModule {
    fn name(&self) -> &'static str {
        "controller"
    }

    fn init(&mut self, _ctx: &DroneContext) {}

    fn tick(&mut self, ctx: &DroneContext) {
        ctx.control.store(self.inputs.command());
    }
}
