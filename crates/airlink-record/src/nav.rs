use std::fmt;

use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::fixed::{from_i16, to_i16};
use crate::kind::RecordKind;
use crate::record::Record;

/// Navigation filter solution (42 bytes).
///
/// `sequence` is the command link's last accepted sequence number, not a
/// counter owned by the record; the ground station uses it to confirm
/// delivery of uplinked commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NavSolution {
    pub time: f64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    /// Sent as `f32`.
    pub altitude_m: f64,
    pub vn_ms: f64,
    pub ve_ms: f64,
    pub vd_ms: f64,
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
    pub sequence: i8,
    pub status: u8,
}

impl Record for NavSolution {
    const KIND: RecordKind = RecordKind::Filter;

    fn put_fields(&self, dst: &mut BytesMut) {
        dst.put_f64_le(self.time);
        dst.put_f64_le(self.latitude_deg);
        dst.put_f64_le(self.longitude_deg);
        dst.put_f32_le(self.altitude_m as f32);
        dst.put_i16_le(to_i16(self.vn_ms, 100.0));
        dst.put_i16_le(to_i16(self.ve_ms, 100.0));
        dst.put_i16_le(to_i16(self.vd_ms, 100.0));
        dst.put_i16_le(to_i16(self.roll_deg, 10.0));
        dst.put_i16_le(to_i16(self.pitch_deg, 10.0));
        dst.put_i16_le(to_i16(self.yaw_deg, 10.0));
        dst.put_i8(self.sequence);
        dst.put_u8(self.status);
    }

    fn get_fields(src: &mut &[u8]) -> Self {
        Self {
            time: src.get_f64_le(),
            latitude_deg: src.get_f64_le(),
            longitude_deg: src.get_f64_le(),
            altitude_m: f64::from(src.get_f32_le()),
            vn_ms: from_i16(src.get_i16_le(), 100.0),
            ve_ms: from_i16(src.get_i16_le(), 100.0),
            vd_ms: from_i16(src.get_i16_le(), 100.0),
            roll_deg: from_i16(src.get_i16_le(), 10.0),
            pitch_deg: from_i16(src.get_i16_le(), 10.0),
            yaw_deg: from_i16(src.get_i16_le(), 10.0),
            sequence: src.get_i8(),
            status: src.get_u8(),
        }
    }
}

impl fmt::Display for NavSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.2} pos=({:.8}, {:.8}) alt={:.2}m vel=({:.2}, {:.2}, {:.2}) att=({:.1}, {:.1}, {:.1}) seq={} status={}",
            self.time,
            self.latitude_deg,
            self.longitude_deg,
            self.altitude_m,
            self.vn_ms,
            self.ve_ms,
            self.vd_ms,
            self.roll_deg,
            self.pitch_deg,
            self.yaw_deg,
            self.sequence,
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn nav_round_trip_within_quantization() {
        let nav = NavSolution {
            time: 301.75,
            latitude_deg: 44.98,
            longitude_deg: -93.27,
            altitude_m: 280.0,
            vn_ms: 20.11,
            ve_ms: -1.5,
            vd_ms: 0.3,
            roll_deg: -15.27,
            pitch_deg: 4.44,
            yaw_deg: 359.9,
            sequence: 42,
            status: 0,
        };
        let mut buf = BytesMut::new();
        nav.encode(&mut buf);
        assert_eq!(buf.len(), 42);

        let back = NavSolution::decode(&buf).unwrap();
        assert_eq!(back.latitude_deg, nav.latitude_deg);
        assert_eq!(back.longitude_deg, nav.longitude_deg);
        assert_abs_diff_eq!(back.vn_ms, nav.vn_ms, epsilon = 0.01);
        assert_abs_diff_eq!(back.roll_deg, nav.roll_deg, epsilon = 0.1);
        assert_abs_diff_eq!(back.pitch_deg, nav.pitch_deg, epsilon = 0.1);
        assert_abs_diff_eq!(back.yaw_deg, nav.yaw_deg, epsilon = 0.1);
        assert_eq!(back.sequence, 42);
    }

    #[test]
    fn sequence_byte_is_signed() {
        let nav = NavSolution {
            sequence: -1,
            ..NavSolution::default()
        };
        let mut buf = BytesMut::new();
        nav.encode(&mut buf);
        assert_eq!(buf[40], 0xFF);
        assert_eq!(NavSolution::decode(&buf).unwrap().sequence, -1);
    }
}
