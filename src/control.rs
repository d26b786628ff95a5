//! Control input sources and the merge policy between them
//!
//! Two sources can feed the same axis at once: a physical input device
//! (gamepad/joystick glue) and a virtual on-screen control. Per axis the
//! stronger input wins: whichever source has the larger absolute magnitude
//! becomes the effective value, and on an exact tie the physical device
//! wins. The merge is deterministic; there is no blending.
//!
//! Normalized axis values in [-1.0, 1.0] are scaled by
//! [`AXIS_SCALE`](crate::protocol::AXIS_SCALE) into the i16 wire range.
//! Out-of-range inputs are clamped before scaling.

use crate::protocol::{AXIS_SCALE, ControlCommand};
use parking_lot::Mutex;
use std::sync::Arc;

/// Normalized values for the four control axes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisValues {
    pub throttle: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

/// Pick the stronger of two axis values; ties go to `physical`
fn stronger(physical: f32, virtual_: f32) -> f32 {
    if virtual_.abs() > physical.abs() {
        virtual_
    } else {
        physical
    }
}

/// Scale a normalized axis value into the i16 wire range
pub fn axis_to_raw(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * AXIS_SCALE as f32) as i16
}

#[derive(Debug, Default)]
struct InputState {
    physical: AxisValues,
    virtual_: AxisValues,
}

/// Shared handle the input glue writes into and the controller module
/// reads from
///
/// Writers (input callbacks, UI) run on whatever thread delivers their
/// events; the pipeline reads once per tick. All access goes through one
/// short lock.
#[derive(Debug, Clone, Default)]
pub struct ControlInputs {
    state: Arc<Mutex<InputState>>,
}

impl ControlInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all physical-device axes at once
    pub fn set_physical(&self, axes: AxisValues) {
        self.state.lock().physical = axes;
    }

    /// Replace all virtual-control axes at once
    pub fn set_virtual(&self, axes: AxisValues) {
        self.state.lock().virtual_ = axes;
    }

    /// Set the virtual throttle axis (on-screen vertical slider)
    pub fn set_virtual_throttle(&self, value: f32) {
        self.state.lock().virtual_.throttle = value;
    }

    /// Set the virtual yaw axis (on-screen horizontal slider)
    pub fn set_virtual_yaw(&self, value: f32) {
        self.state.lock().virtual_.yaw = value;
    }

    /// Effective merged axes under the stronger-input-wins policy
    pub fn merged(&self) -> AxisValues {
        let state = self.state.lock();
        AxisValues {
            throttle: stronger(state.physical.throttle, state.virtual_.throttle),
            yaw: stronger(state.physical.yaw, state.virtual_.yaw),
            pitch: stronger(state.physical.pitch, state.virtual_.pitch),
            roll: stronger(state.physical.roll, state.virtual_.roll),
        }
    }

    /// Merged axes scaled into a wire-ready command
    pub fn command(&self) -> ControlCommand {
        let axes = self.merged();
        ControlCommand {
            throttle: axis_to_raw(axes.throttle),
            yaw: axis_to_raw(axes.yaw),
            pitch: axis_to_raw(axes.pitch),
            roll: axis_to_raw(axes.roll),
        }
    }
}
