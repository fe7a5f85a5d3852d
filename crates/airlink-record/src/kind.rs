use std::fmt;
use std::str::FromStr;

use airlink_frame::packet::{
    packet_name, ACTUATOR_PACKET_V1, AIR_DATA_PACKET_V4, AP_STATUS_PACKET_V2, FILTER_PACKET_V1,
    GPS_PACKET_V1, IMU_PACKET_V2, PAYLOAD_PACKET_V1, PILOT_INPUT_PACKET_V1,
    SYSTEM_HEALTH_PACKET_V3,
};
use serde::{Deserialize, Serialize};

use crate::error::{RecordError, Result};

/// The nine telemetry record types.
///
/// Serialized names match the per-record keys of the link configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Gps,
    Imu,
    #[serde(rename = "airdata")]
    AirData,
    Filter,
    Actuator,
    Pilot,
    Ap,
    Health,
    Payload,
}

impl RecordKind {
    /// Every record kind, in transmit order.
    pub const ALL: [RecordKind; 9] = [
        RecordKind::Gps,
        RecordKind::Imu,
        RecordKind::AirData,
        RecordKind::Filter,
        RecordKind::Actuator,
        RecordKind::Pilot,
        RecordKind::Ap,
        RecordKind::Health,
        RecordKind::Payload,
    ];

    /// The packet id carried in the frame's type byte.
    pub fn packet_id(self) -> u8 {
        match self {
            RecordKind::Gps => GPS_PACKET_V1,
            RecordKind::Imu => IMU_PACKET_V2,
            RecordKind::AirData => AIR_DATA_PACKET_V4,
            RecordKind::Filter => FILTER_PACKET_V1,
            RecordKind::Actuator => ACTUATOR_PACKET_V1,
            RecordKind::Pilot => PILOT_INPUT_PACKET_V1,
            RecordKind::Ap => AP_STATUS_PACKET_V2,
            RecordKind::Health => SYSTEM_HEALTH_PACKET_V3,
            RecordKind::Payload => PAYLOAD_PACKET_V1,
        }
    }

    /// Map a frame's packet id back to its record kind.
    pub fn from_packet_id(id: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.packet_id() == id)
            .ok_or(RecordError::UnknownPacket(id))
    }

    /// Exact payload length of this record's layout in bytes.
    pub fn payload_len(self) -> usize {
        match self {
            RecordKind::Gps => 44,
            RecordKind::Imu => 47,
            RecordKind::AirData => 31,
            RecordKind::Filter => 42,
            RecordKind::Actuator | RecordKind::Pilot => 25,
            RecordKind::Ap => 45,
            RecordKind::Health => 20,
            RecordKind::Payload => 10,
        }
    }

    /// Wire name of the packet (e.g. `AIR_DATA`).
    pub fn packet_name(self) -> &'static str {
        packet_name(self.packet_id())
    }

    /// Configuration key (e.g. `airdata`).
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Gps => "gps",
            RecordKind::Imu => "imu",
            RecordKind::AirData => "airdata",
            RecordKind::Filter => "filter",
            RecordKind::Actuator => "actuator",
            RecordKind::Pilot => "pilot",
            RecordKind::Ap => "ap",
            RecordKind::Health => "health",
            RecordKind::Payload => "payload",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown record kind '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_ids_round_trip() {
        for kind in RecordKind::ALL {
            assert_eq!(RecordKind::from_packet_id(kind.packet_id()).unwrap(), kind);
        }
    }

    #[test]
    fn packet_ids_are_distinct() {
        let mut ids: Vec<u8> = RecordKind::ALL.iter().map(|k| k.packet_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), RecordKind::ALL.len());
    }

    #[test]
    fn unknown_packet_id_rejected() {
        assert!(matches!(
            RecordKind::from_packet_id(1),
            Err(RecordError::UnknownPacket(1))
        ));
    }

    #[test]
    fn names_and_keys() {
        assert_eq!(RecordKind::AirData.packet_name(), "AIR_DATA");
        assert_eq!(RecordKind::AirData.to_string(), "airdata");
        assert_eq!("health".parse::<RecordKind>().unwrap(), RecordKind::Health);
        assert!("telemetry".parse::<RecordKind>().is_err());
    }

    #[test]
    fn serde_uses_config_keys() {
        let json = serde_json::to_string(&RecordKind::AirData).unwrap();
        assert_eq!(json, "\"airdata\"");
        let kind: RecordKind = serde_json::from_str("\"filter\"").unwrap();
        assert_eq!(kind, RecordKind::Filter);
    }
}
