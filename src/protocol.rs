//! Wire protocol for the vehicle link
//!
//! Packet formats (all fields little-endian, no padding):
//!
//! ```text
//! ControlCommand (8 bytes, ground -> vehicle):
//! [throttle:i16] [yaw:i16] [pitch:i16] [roll:i16]
//!
//! TelemetryFrame (34 bytes, vehicle -> ground):
//! [pitch:i16] [roll:i16]                      offsets  0..4
//! [accel_x:i16] [accel_y:i16] [accel_z:i16]   offsets  4..10
//! [voltage:i16]                               offsets 10..12
//! [distance[6]:u16]                           offsets 12..24
//! [other[5]:i16]                              offsets 24..34
//! ```
//!
//! One datagram carries exactly one record. There is no framing, length
//! prefix or checksum: the fixed record size is the validity check, and a
//! buffer whose length differs from the declared size is rejected whole.
//! The protocol is fire-and-forget; nothing is acknowledged.
//!
//! Axis values are normalized stick positions scaled by [`AXIS_SCALE`]
//! into the i16 range. Telemetry pitch/roll are in hundredths of a degree,
//! distances in centimeters.

use crate::error::{Error, Result};

/// Wire size of [`ControlCommand`]
pub const CONTROL_COMMAND_SIZE: usize = 8;

/// Wire size of [`TelemetryFrame`]
pub const TELEMETRY_FRAME_SIZE: usize = 34;

/// Fixed-point scale for normalized axis values (±1.0 -> ±1000)
pub const AXIS_SCALE: i16 = 1000;

/// Outbound control command (one per send cycle, latest value wins)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlCommand {
    /// Throttle axis, normalized ×1000
    pub throttle: i16,
    /// Yaw axis, normalized ×1000
    pub yaw: i16,
    /// Pitch axis, normalized ×1000
    pub pitch: i16,
    /// Roll axis, normalized ×1000
    pub roll: i16,
}

impl ControlCommand {
    /// Encode into the fixed 8-byte wire layout
    pub fn encode(&self) -> [u8; CONTROL_COMMAND_SIZE] {
        let mut buf = [0u8; CONTROL_COMMAND_SIZE];
        buf[0..2].copy_from_slice(&self.throttle.to_le_bytes());
        buf[2..4].copy_from_slice(&self.yaw.to_le_bytes());
        buf[4..6].copy_from_slice(&self.pitch.to_le_bytes());
        buf[6..8].copy_from_slice(&self.roll.to_le_bytes());
        buf
    }

    /// Decode from a received buffer
    ///
    /// The buffer is accepted iff its length equals
    /// [`CONTROL_COMMAND_SIZE`] exactly; anything else is a
    /// [`Error::SizeMismatch`] and the caller drops the datagram.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() != CONTROL_COMMAND_SIZE {
            return Err(Error::SizeMismatch {
                expected: CONTROL_COMMAND_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self {
            throttle: i16::from_le_bytes([data[0], data[1]]),
            yaw: i16::from_le_bytes([data[2], data[3]]),
            pitch: i16::from_le_bytes([data[4], data[5]]),
            roll: i16::from_le_bytes([data[6], data[7]]),
        })
    }
}

/// Inbound telemetry frame (latest value wins, no history)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryFrame {
    /// Pitch angle, hundredths of a degree
    pub pitch: i16,
    /// Roll angle, hundredths of a degree
    pub roll: i16,
    /// Linear acceleration X
    pub linear_accel_x: i16,
    /// Linear acceleration Y
    pub linear_accel_y: i16,
    /// Linear acceleration Z
    pub linear_accel_z: i16,
    /// Battery voltage
    pub voltage: i16,
    /// Distance sensor readings, centimeters
    pub distance_sensors: [u16; 6],
    /// Reserved fields
    pub other: [i16; 5],
}

impl TelemetryFrame {
    /// Encode into the fixed 34-byte wire layout
    pub fn encode(&self) -> [u8; TELEMETRY_FRAME_SIZE] {
        let mut buf = [0u8; TELEMETRY_FRAME_SIZE];
        buf[0..2].copy_from_slice(&self.pitch.to_le_bytes());
        buf[2..4].copy_from_slice(&self.roll.to_le_bytes());
        buf[4..6].copy_from_slice(&self.linear_accel_x.to_le_bytes());
        buf[6..8].copy_from_slice(&self.linear_accel_y.to_le_bytes());
        buf[8..10].copy_from_slice(&self.linear_accel_z.to_le_bytes());
        buf[10..12].copy_from_slice(&self.voltage.to_le_bytes());
        for (i, d) in self.distance_sensors.iter().enumerate() {
            let off = 12 + i * 2;
            buf[off..off + 2].copy_from_slice(&d.to_le_bytes());
        }
        for (i, o) in self.other.iter().enumerate() {
            let off = 24 + i * 2;
            buf[off..off + 2].copy_from_slice(&o.to_le_bytes());
        }
        buf
    }

    /// Decode from a received buffer
    ///
    /// The buffer is accepted iff its length equals
    /// [`TELEMETRY_FRAME_SIZE`] exactly. A truncated or oversized buffer is
    /// rejected whole so a garbled datagram can never produce a partial
    /// frame.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() != TELEMETRY_FRAME_SIZE {
            return Err(Error::SizeMismatch {
                expected: TELEMETRY_FRAME_SIZE,
                actual: data.len(),
            });
        }
        let mut distance_sensors = [0u16; 6];
        for (i, d) in distance_sensors.iter_mut().enumerate() {
            let off = 12 + i * 2;
            *d = u16::from_le_bytes([data[off], data[off + 1]]);
        }
        let mut other = [0i16; 5];
        for (i, o) in other.iter_mut().enumerate() {
            let off = 24 + i * 2;
            *o = i16::from_le_bytes([data[off], data[off + 1]]);
        }
        Ok(Self {
            pitch: i16::from_le_bytes([data[0], data[1]]),
            roll: i16::from_le_bytes([data[2], data[3]]),
            linear_accel_x: i16::from_le_bytes([data[4], data[5]]),
            linear_accel_y: i16::from_le_bytes([data[6], data[7]]),
            linear_accel_z: i16::from_le_bytes([data[8], data[9]]),
            voltage: i16::from_le_bytes([data[10], data[11]]),
            distance_sensors,
            other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_command_wire_bytes() {
        // throttle=500 -> 0x01F4 little-endian
        let cmd = ControlCommand {
            throttle: 500,
            yaw: 0,
            pitch: 0,
            roll: 0,
        };
        let bytes = cmd.encode();
        assert_eq!(bytes, [0xF4, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(ControlCommand::decode(&bytes).unwrap(), cmd);
    }

    #[test]
    fn test_control_command_round_trip_extremes() {
        for v in [i16::MIN, -1000, -1, 0, 1, 1000, i16::MAX] {
            let cmd = ControlCommand {
                throttle: v,
                yaw: v.wrapping_neg(),
                pitch: v,
                roll: v.wrapping_neg(),
            };
            assert_eq!(ControlCommand::decode(&cmd.encode()).unwrap(), cmd);
        }
    }

    #[test]
    fn test_control_command_size_gate() {
        let result = ControlCommand::decode(&[0u8; 7]);
        assert!(matches!(
            result,
            Err(crate::Error::SizeMismatch {
                expected: 8,
                actual: 7
            })
        ));
        assert!(ControlCommand::decode(&[0u8; 9]).is_err());
        assert!(ControlCommand::decode(&[]).is_err());
    }

    #[test]
    fn test_telemetry_round_trip() {
        let frame = TelemetryFrame {
            pitch: -1234,
            roll: 4321,
            linear_accel_x: i16::MAX,
            linear_accel_y: i16::MIN,
            linear_accel_z: 0,
            voltage: 1180,
            distance_sensors: [0, 1, 500, u16::MAX, 42, 10000],
            other: [i16::MIN, -1, 0, 1, i16::MAX],
        };
        let bytes = frame.encode();
        assert_eq!(bytes.len(), TELEMETRY_FRAME_SIZE);
        assert_eq!(TelemetryFrame::decode(&bytes).unwrap(), frame);
    }

    #[test]
    fn test_telemetry_zero_frame() {
        let frame = TelemetryFrame::default();
        let bytes = frame.encode();
        assert!(bytes.iter().all(|&b| b == 0));
        assert_eq!(TelemetryFrame::decode(&bytes).unwrap(), frame);
    }

    #[test]
    fn test_telemetry_field_offsets() {
        let frame = TelemetryFrame {
            voltage: 0x0102,
            distance_sensors: [0x0304; 6],
            other: [0x0506; 5],
            ..Default::default()
        };
        let bytes = frame.encode();
        assert_eq!(&bytes[10..12], &[0x02, 0x01]);
        assert_eq!(&bytes[12..14], &[0x04, 0x03]);
        assert_eq!(&bytes[24..26], &[0x06, 0x05]);
    }

    #[test]
    fn test_telemetry_size_gate() {
        // 33 bytes where 34 are expected must be rejected whole
        let result = TelemetryFrame::decode(&[0u8; 33]);
        assert!(matches!(
            result,
            Err(crate::Error::SizeMismatch {
                expected: 34,
                actual: 33
            })
        ));
        assert!(TelemetryFrame::decode(&[0u8; 35]).is_err());
    }
}
