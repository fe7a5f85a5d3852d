//! Raw sensor records: GPS fix, inertial sample, air data.

use std::fmt;

use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::fixed::{from_i16, from_u16, from_u8, to_i16, to_u16, to_u8};
use crate::kind::RecordKind;
use crate::record::Record;

/// GPS fix (44 bytes).
///
/// Velocities travel as `i16` at 0.01 m/s (±327.67 m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    pub time: f64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    /// Sent as `f32`.
    pub altitude_m: f64,
    pub vn_ms: f64,
    pub ve_ms: f64,
    pub vd_ms: f64,
    pub unix_time_sec: f64,
    pub satellites: u8,
    pub status: u8,
}

impl Record for GpsFix {
    const KIND: RecordKind = RecordKind::Gps;

    fn put_fields(&self, dst: &mut BytesMut) {
        dst.put_f64_le(self.time);
        dst.put_f64_le(self.latitude_deg);
        dst.put_f64_le(self.longitude_deg);
        dst.put_f32_le(self.altitude_m as f32);
        dst.put_i16_le(to_i16(self.vn_ms, 100.0));
        dst.put_i16_le(to_i16(self.ve_ms, 100.0));
        dst.put_i16_le(to_i16(self.vd_ms, 100.0));
        dst.put_f64_le(self.unix_time_sec);
        dst.put_u8(self.satellites);
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
            unix_time_sec: src.get_f64_le(),
            satellites: src.get_u8(),
            status: src.get_u8(),
        }
    }
}

impl fmt::Display for GpsFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.2} pos=({:.8}, {:.8}) alt={:.2}m vel=({:.2}, {:.2}, {:.2}) unix={:.2} sats={} status={}",
            self.time,
            self.latitude_deg,
            self.longitude_deg,
            self.altitude_m,
            self.vn_ms,
            self.ve_ms,
            self.vd_ms,
            self.unix_time_sec,
            self.satellites,
            self.status
        )
    }
}

/// Inertial sample (47 bytes).
///
/// Rates, accelerations and raw magnetometer axes are sent as `f32`; the
/// temperature as `i16` at 0.1 °C.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImuSample {
    pub time: f64,
    pub p_rad_sec: f64,
    pub q_rad_sec: f64,
    pub r_rad_sec: f64,
    pub ax_mps_sec: f64,
    pub ay_mps_sec: f64,
    pub az_mps_sec: f64,
    pub hx: f64,
    pub hy: f64,
    pub hz: f64,
    pub temp_c: f64,
    pub status: u8,
}

impl Record for ImuSample {
    const KIND: RecordKind = RecordKind::Imu;

    fn put_fields(&self, dst: &mut BytesMut) {
        dst.put_f64_le(self.time);
        for value in [
            self.p_rad_sec,
            self.q_rad_sec,
            self.r_rad_sec,
            self.ax_mps_sec,
            self.ay_mps_sec,
            self.az_mps_sec,
            self.hx,
            self.hy,
            self.hz,
        ] {
            dst.put_f32_le(value as f32);
        }
        dst.put_i16_le(to_i16(self.temp_c, 10.0));
        dst.put_u8(self.status);
    }

    fn get_fields(src: &mut &[u8]) -> Self {
        let time = src.get_f64_le();
        let mut axes = [0.0f64; 9];
        for axis in &mut axes {
            *axis = f64::from(src.get_f32_le());
        }
        let [p, q, r, ax, ay, az, hx, hy, hz] = axes;
        Self {
            time,
            p_rad_sec: p,
            q_rad_sec: q,
            r_rad_sec: r,
            ax_mps_sec: ax,
            ay_mps_sec: ay,
            az_mps_sec: az,
            hx,
            hy,
            hz,
            temp_c: from_i16(src.get_i16_le(), 10.0),
            status: src.get_u8(),
        }
    }
}

impl fmt::Display for ImuSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.2} gyro=({:.3}, {:.3}, {:.3}) accel=({:.3}, {:.3}, {:.3}) mag=({:.3}, {:.3}, {:.3}) temp={:.1}C status={}",
            self.time,
            self.p_rad_sec,
            self.q_rad_sec,
            self.r_rad_sec,
            self.ax_mps_sec,
            self.ay_mps_sec,
            self.az_mps_sec,
            self.hx,
            self.hy,
            self.hz,
            self.temp_c,
            self.status
        )
    }
}

/// Air data (31 bytes).
///
/// The climb rate is carried in feet per minute ×10, so `climb_fps` comes
/// back at 1/600 fps resolution. Two reserved bytes follow it on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AirData {
    pub time: f64,
    pub pressure_mbar: f64,
    pub temp_c: f64,
    pub airspeed_kt: f64,
    /// Pressure altitude, sent as `f32`.
    pub altitude_m: f64,
    /// Blended true altitude, sent as `f32`.
    pub altitude_true_m: f64,
    pub climb_fps: f64,
    pub wind_dir_deg: f64,
    pub wind_speed_kt: f64,
    pub pitot_scale: f64,
    pub status: u8,
}

impl Record for AirData {
    const KIND: RecordKind = RecordKind::AirData;

    fn put_fields(&self, dst: &mut BytesMut) {
        dst.put_f64_le(self.time);
        dst.put_u16_le(to_u16(self.pressure_mbar, 10.0));
        dst.put_i16_le(to_i16(self.temp_c, 10.0));
        dst.put_i16_le(to_i16(self.airspeed_kt, 100.0));
        dst.put_f32_le(self.altitude_m as f32);
        dst.put_f32_le(self.altitude_true_m as f32);
        dst.put_i16_le(to_i16(self.climb_fps * 60.0, 10.0));
        dst.put_i16_le(0);
        dst.put_u16_le(to_u16(self.wind_dir_deg, 100.0));
        dst.put_u8(to_u8(self.wind_speed_kt, 4.0));
        dst.put_u8(to_u8(self.pitot_scale, 100.0));
        dst.put_u8(self.status);
    }

    fn get_fields(src: &mut &[u8]) -> Self {
        let time = src.get_f64_le();
        let pressure_mbar = from_u16(src.get_u16_le(), 10.0);
        let temp_c = from_i16(src.get_i16_le(), 10.0);
        let airspeed_kt = from_i16(src.get_i16_le(), 100.0);
        let altitude_m = f64::from(src.get_f32_le());
        let altitude_true_m = f64::from(src.get_f32_le());
        let climb_fps = from_i16(src.get_i16_le(), 10.0) / 60.0;
        src.advance(2);
        Self {
            time,
            pressure_mbar,
            temp_c,
            airspeed_kt,
            altitude_m,
            altitude_true_m,
            climb_fps,
            wind_dir_deg: from_u16(src.get_u16_le(), 100.0),
            wind_speed_kt: from_u8(src.get_u8(), 4.0),
            pitot_scale: from_u8(src.get_u8(), 100.0),
            status: src.get_u8(),
        }
    }
}

impl fmt::Display for AirData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.2} press={:.1}mbar temp={:.1}C ias={:.2}kt alt={:.1}m true={:.1}m climb={:.1}fpm wind={:.1}deg@{:.2}kt pitot={:.2} status={}",
            self.time,
            self.pressure_mbar,
            self.temp_c,
            self.airspeed_kt,
            self.altitude_m,
            self.altitude_true_m,
            self.climb_fps * 60.0,
            self.wind_dir_deg,
            self.wind_speed_kt,
            self.pitot_scale,
            self.status
        )
    }
}
