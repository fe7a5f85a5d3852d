//! Packet ids carried in the frame's type byte.
//!
//! Ids are part of the wire contract: a layout change gets a new id.

/// GPS fix, v1 layout.
pub const GPS_PACKET_V1: u8 = 0;

/// Navigation filter solution, v1 layout.
pub const FILTER_PACKET_V1: u8 = 2;

/// Actuator command, v1 layout.
pub const ACTUATOR_PACKET_V1: u8 = 3;

/// Pilot stick input, v1 layout.
pub const PILOT_INPUT_PACKET_V1: u8 = 4;

/// Payload event counter, v1 layout.
pub const PAYLOAD_PACKET_V1: u8 = 8;

/// Autopilot targets, v2 layout.
pub const AP_STATUS_PACKET_V2: u8 = 12;

/// System health, v3 layout.
pub const SYSTEM_HEALTH_PACKET_V3: u8 = 13;

/// Air data, v4 layout.
pub const AIR_DATA_PACKET_V4: u8 = 14;

/// Inertial sample, v2 layout.
pub const IMU_PACKET_V2: u8 = 15;

/// Returns a human-readable name for a packet id.
pub fn packet_name(id: u8) -> &'static str {
    match id {
        GPS_PACKET_V1 => "GPS",
        FILTER_PACKET_V1 => "FILTER",
        ACTUATOR_PACKET_V1 => "ACTUATOR",
        PILOT_INPUT_PACKET_V1 => "PILOT",
        PAYLOAD_PACKET_V1 => "PAYLOAD",
        AP_STATUS_PACKET_V2 => "AP_STATUS",
        SYSTEM_HEALTH_PACKET_V3 => "HEALTH",
        AIR_DATA_PACKET_V4 => "AIR_DATA",
        IMU_PACKET_V2 => "IMU",
        _ => "UNKNOWN",
    }
}

/// Returns true if the id names a layout this crate version transmits.
pub fn is_known(id: u8) -> bool {
    packet_name(id) != "UNKNOWN"
}
