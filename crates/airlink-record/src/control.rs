//! Control surface records. Actuator outputs and pilot stick inputs share
//! one 25-byte layout: time, eight channels, status.

use std::fmt;

use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::fixed::{from_i16, from_u16, to_i16, to_u16};
use crate::kind::RecordKind;
use crate::record::Record;

/// Number of channels carried per record.
pub const CHANNEL_COUNT: usize = 8;

/// Index of the throttle channel, the only unipolar one.
pub const THROTTLE_CHANNEL: usize = 2;

/// Index of the pilot record's manual-override channel.
pub const MANUAL_CHANNEL: usize = 4;

const BIPOLAR_SCALE: f64 = 30000.0;
const UNIPOLAR_SCALE: f64 = 60000.0;

fn put_channels(dst: &mut BytesMut, time: f64, channels: &[f64; CHANNEL_COUNT], status: u8) {
    dst.put_f64_le(time);
    for (index, &value) in channels.iter().enumerate() {
        if index == THROTTLE_CHANNEL {
            dst.put_u16_le(to_u16(value, UNIPOLAR_SCALE));
        } else {
            dst.put_i16_le(to_i16(value, BIPOLAR_SCALE));
        }
    }
    dst.put_u8(status);
}

fn get_channels(src: &mut &[u8]) -> (f64, [f64; CHANNEL_COUNT], u8) {
    let time = src.get_f64_le();
    let mut channels = [0.0; CHANNEL_COUNT];
    for (index, channel) in channels.iter_mut().enumerate() {
        *channel = if index == THROTTLE_CHANNEL {
            from_u16(src.get_u16_le(), UNIPOLAR_SCALE)
        } else {
            from_i16(src.get_i16_le(), BIPOLAR_SCALE)
        };
    }
    (time, channels, src.get_u8())
}

fn fmt_channels(f: &mut fmt::Formatter<'_>, time: f64, channels: &[f64], status: u8) -> fmt::Result {
    write!(f, "t={time:.2} ch=[")?;
    for (index, value) in channels.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value:.2}")?;
    }
    write!(f, "] status={status}")
}

/// Actuator outputs (normalised: ±1, throttle 0..1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    pub time: f64,
    /// aileron, elevator, throttle, rudder, then channels 5-8.
    pub channels: [f64; CHANNEL_COUNT],
    pub status: u8,
}

impl Record for ActuatorCommand {
    const KIND: RecordKind = RecordKind::Actuator;

    fn put_fields(&self, dst: &mut BytesMut) {
        put_channels(dst, self.time, &self.channels, self.status);
    }

    fn get_fields(src: &mut &[u8]) -> Self {
        let (time, channels, status) = get_channels(src);
        Self {
            time,
            channels,
            status,
        }
    }
}

impl fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_channels(f, self.time, &self.channels, self.status)
    }
}

/// Pilot stick inputs. Channel 4 carries the manual-override switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PilotInput {
    pub time: f64,
    /// aileron, elevator, throttle, rudder, manual, then channels 6-8.
    pub channels: [f64; CHANNEL_COUNT],
    pub status: u8,
}

impl PilotInput {
    /// Whether the pilot has taken manual control.
    pub fn manual(&self) -> bool {
        self.channels[MANUAL_CHANNEL] > 0.5
    }
}

impl Record for PilotInput {
    const KIND: RecordKind = RecordKind::Pilot;

    fn put_fields(&self, dst: &mut BytesMut) {
        put_channels(dst, self.time, &self.channels, self.status);
    }

    fn get_fields(src: &mut &[u8]) -> Self {
        let (time, channels, status) = get_channels(src);
        Self {
            time,
            channels,
            status,
        }
    }
}

impl fmt::Display for PilotInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_channels(f, self.time, &self.channels, self.status)?;
        if self.manual() {
            f.write_str(" manual")?;
        }
        Ok(())
    }
}
