use std::fmt;

use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::control::{ActuatorCommand, PilotInput};
use crate::error::Result;
use crate::kind::RecordKind;
use crate::nav::NavSolution;
use crate::record::Record;
use crate::sensors::{AirData, GpsFix, ImuSample};
use crate::status::{AutopilotStatus, PayloadEvent, SystemHealth};

/// Any one of the nine telemetry records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum TelemetryRecord {
    Gps(GpsFix),
    Imu(ImuSample),
    AirData(AirData),
    Nav(NavSolution),
    Actuator(ActuatorCommand),
    Pilot(PilotInput),
    ApStatus(AutopilotStatus),
    Health(SystemHealth),
    Payload(PayloadEvent),
}

macro_rules! each_record {
    ($record:expr, $inner:ident => $body:expr) => {
        match $record {
            TelemetryRecord::Gps($inner) => $body,
            TelemetryRecord::Imu($inner) => $body,
            TelemetryRecord::AirData($inner) => $body,
            TelemetryRecord::Nav($inner) => $body,
            TelemetryRecord::Actuator($inner) => $body,
            TelemetryRecord::Pilot($inner) => $body,
            TelemetryRecord::ApStatus($inner) => $body,
            TelemetryRecord::Health($inner) => $body,
            TelemetryRecord::Payload($inner) => $body,
        }
    };
}

impl TelemetryRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            TelemetryRecord::Gps(_) => RecordKind::Gps,
            TelemetryRecord::Imu(_) => RecordKind::Imu,
            TelemetryRecord::AirData(_) => RecordKind::AirData,
            TelemetryRecord::Nav(_) => RecordKind::Filter,
            TelemetryRecord::Actuator(_) => RecordKind::Actuator,
            TelemetryRecord::Pilot(_) => RecordKind::Pilot,
            TelemetryRecord::ApStatus(_) => RecordKind::Ap,
            TelemetryRecord::Health(_) => RecordKind::Health,
            TelemetryRecord::Payload(_) => RecordKind::Payload,
        }
    }

    /// Packet id to frame this record under.
    pub fn packet_id(&self) -> u8 {
        self.kind().packet_id()
    }

    /// Append the record payload (no frame) to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        each_record!(self, record => record.encode(dst))
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.kind().payload_len());
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Decode a frame payload according to its packet id.
    pub fn decode(packet_id: u8, payload: &[u8]) -> Result<Self> {
        let record = match RecordKind::from_packet_id(packet_id)? {
            RecordKind::Gps => TelemetryRecord::Gps(GpsFix::decode(payload)?),
            RecordKind::Imu => TelemetryRecord::Imu(ImuSample::decode(payload)?),
            RecordKind::AirData => TelemetryRecord::AirData(AirData::decode(payload)?),
            RecordKind::Filter => TelemetryRecord::Nav(NavSolution::decode(payload)?),
            RecordKind::Actuator => TelemetryRecord::Actuator(ActuatorCommand::decode(payload)?),
            RecordKind::Pilot => TelemetryRecord::Pilot(PilotInput::decode(payload)?),
            RecordKind::Ap => TelemetryRecord::ApStatus(AutopilotStatus::decode(payload)?),
            RecordKind::Health => TelemetryRecord::Health(SystemHealth::decode(payload)?),
            RecordKind::Payload => TelemetryRecord::Payload(PayloadEvent::decode(payload)?),
        };
        Ok(record)
    }

    /// Stamp the command link's last accepted sequence number into records
    /// that carry one (nav and autopilot status). Truncated to `i8`.
    pub fn stamp_sequence(&mut self, sequence: i64) {
        match self {
            TelemetryRecord::Nav(nav) => nav.sequence = sequence as i8,
            TelemetryRecord::ApStatus(ap) => ap.sequence = sequence as i8,
            _ => {}
        }
    }
}

impl fmt::Display for TelemetryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<9} ", self.kind().packet_name())?;
        each_record!(self, record => fmt::Display::fmt(record, f))
    }
}

macro_rules! impl_from_record {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for TelemetryRecord {
                fn from(record: $ty) -> Self {
                    TelemetryRecord::$variant(record)
                }
            }
        )*
    };
}

impl_from_record! {
    GpsFix => Gps,
    ImuSample => Imu,
    AirData => AirData,
    NavSolution => Nav,
    ActuatorCommand => Actuator,
    PilotInput => Pilot,
    AutopilotStatus => ApStatus,
    SystemHealth => Health,
    PayloadEvent => Payload,
}
