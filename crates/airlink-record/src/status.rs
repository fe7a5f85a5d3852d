//! Autopilot, health and payload status records.

use std::fmt;

use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::fixed::{from_i16, from_u16, msl_target_ft, to_i16, to_u16};
use crate::kind::RecordKind;
use crate::record::Record;

/// Autopilot targets plus one route waypoint (45 bytes).
///
/// The route is downlinked one waypoint per record: `waypoint_index` names
/// which entry `waypoint_lon_deg`/`waypoint_lat_deg` belong to, and the
/// ground station reassembles the route from `route_size` records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AutopilotStatus {
    pub time: f64,
    pub target_heading_deg: f64,
    pub target_roll_deg: f64,
    /// Whole feet; see [`msl_target_ft`].
    pub target_msl_ft: f64,
    pub target_climb_fps: f64,
    pub target_pitch_deg: f64,
    pub target_pitch_rate: f64,
    pub target_speed_kt: f64,
    /// Sent as 0 when it does not index into the route.
    pub active_waypoint: u16,
    pub waypoint_lon_deg: f64,
    pub waypoint_lat_deg: f64,
    pub waypoint_index: u16,
    pub route_size: u16,
    pub sequence: i8,
}

impl AutopilotStatus {
    /// Set `target_msl_ft` from the pressure ground altitude, the pressure
    /// altitude error and the AGL target.
    pub fn with_msl_target(
        mut self,
        ground_alt_m: f64,
        pressure_error_m: f64,
        target_agl_ft: f64,
    ) -> Self {
        self.target_msl_ft = msl_target_ft(ground_alt_m, pressure_error_m, target_agl_ft);
        self
    }
}

impl Record for AutopilotStatus {
    const KIND: RecordKind = RecordKind::Ap;

    fn put_fields(&self, dst: &mut BytesMut) {
        let active = if self.active_waypoint >= self.route_size {
            0
        } else {
            self.active_waypoint
        };

        dst.put_f64_le(self.time);
        dst.put_i16_le(to_i16(self.target_heading_deg, 10.0));
        dst.put_i16_le(to_i16(self.target_roll_deg, 10.0));
        dst.put_u16_le(to_u16(self.target_msl_ft, 1.0));
        dst.put_i16_le(to_i16(self.target_climb_fps, 10.0));
        dst.put_i16_le(to_i16(self.target_pitch_deg, 10.0));
        dst.put_i16_le(to_i16(self.target_pitch_rate, 1000.0));
        dst.put_i16_le(to_i16(self.target_speed_kt, 10.0));
        dst.put_u16_le(active);
        dst.put_f64_le(self.waypoint_lon_deg);
        dst.put_f64_le(self.waypoint_lat_deg);
        dst.put_u16_le(self.waypoint_index);
        dst.put_u16_le(self.route_size);
        dst.put_i8(self.sequence);
    }

    fn get_fields(src: &mut &[u8]) -> Self {
        Self {
            time: src.get_f64_le(),
            target_heading_deg: from_i16(src.get_i16_le(), 10.0),
            target_roll_deg: from_i16(src.get_i16_le(), 10.0),
            target_msl_ft: f64::from(src.get_u16_le()),
            target_climb_fps: from_i16(src.get_i16_le(), 10.0),
            target_pitch_deg: from_i16(src.get_i16_le(), 10.0),
            target_pitch_rate: from_i16(src.get_i16_le(), 1000.0),
            target_speed_kt: from_i16(src.get_i16_le(), 10.0),
            active_waypoint: src.get_u16_le(),
            waypoint_lon_deg: src.get_f64_le(),
            waypoint_lat_deg: src.get_f64_le(),
            waypoint_index: src.get_u16_le(),
            route_size: src.get_u16_le(),
            sequence: src.get_i8(),
        }
    }
}

impl fmt::Display for AutopilotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.2} hdg={:.1} roll={:.1} msl={:.0}ft climb={:.1} pitch={:.1} pitch_rate={:.3} speed={:.1}kt active={} wp[{}/{}]=({:.10}, {:.10}) seq={}",
            self.time,
            self.target_heading_deg,
            self.target_roll_deg,
            self.target_msl_ft,
            self.target_climb_fps,
            self.target_pitch_deg,
            self.target_pitch_rate,
            self.target_speed_kt,
            self.active_waypoint,
            self.waypoint_index,
            self.route_size,
            self.waypoint_lon_deg,
            self.waypoint_lat_deg,
            self.sequence
        )
    }
}

/// Avionics and battery health (20 bytes).
///
/// Voltages and current travel at 1/1000 resolution; consumed charge is
/// whole mAh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub time: f64,
    pub load_avg: f64,
    pub avionics_vcc: f64,
    pub extern_volt: f64,
    pub extern_cell_volt: f64,
    pub extern_amps: f64,
    pub extern_mah: f64,
}

impl Record for SystemHealth {
    const KIND: RecordKind = RecordKind::Health;

    fn put_fields(&self, dst: &mut BytesMut) {
        dst.put_f64_le(self.time);
        dst.put_u16_le(to_u16(self.load_avg, 100.0));
        dst.put_u16_le(to_u16(self.avionics_vcc, 1000.0));
        dst.put_u16_le(to_u16(self.extern_volt, 1000.0));
        dst.put_u16_le(to_u16(self.extern_cell_volt, 1000.0));
        dst.put_u16_le(to_u16(self.extern_amps, 1000.0));
        dst.put_u16_le(to_u16(self.extern_mah, 1.0));
    }

    fn get_fields(src: &mut &[u8]) -> Self {
        Self {
            time: src.get_f64_le(),
            load_avg: from_u16(src.get_u16_le(), 100.0),
            avionics_vcc: from_u16(src.get_u16_le(), 1000.0),
            extern_volt: from_u16(src.get_u16_le(), 1000.0),
            extern_cell_volt: from_u16(src.get_u16_le(), 1000.0),
            extern_amps: from_u16(src.get_u16_le(), 1000.0),
            extern_mah: f64::from(src.get_u16_le()),
        }
    }
}

impl fmt::Display for SystemHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.2} load={:.2} vcc={:.3}V batt={:.3}V cell={:.3}V amps={:.3}A used={:.0}mAh",
            self.time,
            self.load_avg,
            self.avionics_vcc,
            self.extern_volt,
            self.extern_cell_volt,
            self.extern_amps,
            self.extern_mah
        )
    }
}

/// Payload trigger counter (10 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PayloadEvent {
    pub time: f64,
    pub trigger_num: u16,
}

impl Record for PayloadEvent {
    const KIND: RecordKind = RecordKind::Payload;

    fn put_fields(&self, dst: &mut BytesMut) {
        dst.put_f64_le(self.time);
        dst.put_u16_le(self.trigger_num);
    }

    fn get_fields(src: &mut &[u8]) -> Self {
        Self {
            time: src.get_f64_le(),
            trigger_num: src.get_u16_le(),
        }
    }
}

impl fmt::Display for PayloadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.2} trigger={}", self.time, self.trigger_num)
    }
}
