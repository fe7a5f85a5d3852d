//! Packet framing for the airlink telemetry link.
//!
//! Every record travels inside a self-delimiting frame:
//! - 2 sync bytes (`0x93 0xE0`) for stream re-synchronisation
//! - a 1-byte packet id naming the record layout
//! - a 1-byte payload length (0..=255)
//! - the payload
//! - a 2-byte running checksum over id, length and payload
//!
//! Corrupt frames are dropped whole; no partial record is ever surfaced.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod packet;
pub mod reader;
pub mod writer;

#[cfg(feature = "async")]
pub mod framed;

pub use checksum::{frame_checksum, Checksum, DefaultChecksum, Fletcher8};
pub use codec::{
    decode_frame, decode_frame_with, encode_frame, encode_frame_with, verify_frame,
    verify_frame_with, Frame, CHECKSUM_SIZE, FRAME_OVERHEAD, HEADER_SIZE, MAX_PAYLOAD, SYNC,
};
pub use error::{FrameError, Result};
pub use packet::{
    packet_name, ACTUATOR_PACKET_V1, AIR_DATA_PACKET_V4, AP_STATUS_PACKET_V2, FILTER_PACKET_V1,
    GPS_PACKET_V1, IMU_PACKET_V2, PAYLOAD_PACKET_V1, PILOT_INPUT_PACKET_V1,
    SYSTEM_HEALTH_PACKET_V3,
};
pub use reader::FrameReader;
pub use writer::FrameWriter;

#[cfg(feature = "async")]
pub use framed::TelemetryCodec;
