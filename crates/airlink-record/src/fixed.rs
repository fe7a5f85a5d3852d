//! Fixed-point quantization used by the record layouts.
//!
//! Encoding multiplies by the field's scale and truncates toward zero. Values
//! outside the integer range wrap (two's complement); NaN encodes as 0.

/// Feet per metre.
pub const METER_TO_FEET: f64 = 3.28084;

#[inline]
fn scaled(value: f64, scale: f64) -> i64 {
    // f64 -> i64 saturates and maps NaN to 0; the narrowing cast then wraps.
    (value * scale) as i64
}

pub fn to_i16(value: f64, scale: f64) -> i16 {
    scaled(value, scale) as i16
}

pub fn to_u16(value: f64, scale: f64) -> u16 {
    scaled(value, scale) as u16
}

pub fn to_u8(value: f64, scale: f64) -> u8 {
    scaled(value, scale) as u8
}

pub fn from_i16(raw: i16, scale: f64) -> f64 {
    f64::from(raw) / scale
}

pub fn from_u16(raw: u16, scale: f64) -> f64 {
    f64::from(raw) / scale
}

pub fn from_u8(raw: u8, scale: f64) -> f64 {
    f64::from(raw) / scale
}

/// Target MSL altitude in feet as carried by the autopilot status record:
/// `(ground_alt_m + pressure_error_m) * 3.28084 + target_agl_ft`.
pub fn msl_target_ft(ground_alt_m: f64, pressure_error_m: f64, target_agl_ft: f64) -> f64 {
    (ground_alt_m + pressure_error_m) * METER_TO_FEET + target_agl_ft
}
