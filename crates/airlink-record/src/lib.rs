//! Fixed-layout telemetry records for the airlink telemetry link.
//!
//! Each record type has one byte layout, little-endian, with physical values
//! quantized to fixed-point integers where bandwidth matters. The layouts
//! are the wire contract: changing one means a new packet id.
//!
//! ```
//! use airlink_record::{GpsFix, TelemetryRecord};
//!
//! let record = TelemetryRecord::from(GpsFix { satellites: 9, ..GpsFix::default() });
//! let payload = record.to_bytes();
//! assert_eq!(payload.len(), 44);
//! assert_eq!(TelemetryRecord::decode(record.packet_id(), &payload).unwrap(), record);
//! ```

pub mod control;
pub mod error;
pub mod fixed;
pub mod kind;
pub mod nav;
pub mod record;
pub mod sensors;
pub mod status;
pub mod telemetry;

pub use control::{ActuatorCommand, PilotInput, CHANNEL_COUNT, THROTTLE_CHANNEL};
pub use error::{RecordError, Result};
pub use fixed::msl_target_ft;
pub use kind::RecordKind;
pub use nav::NavSolution;
pub use record::Record;
pub use sensors::{AirData, GpsFix, ImuSample};
pub use status::{AutopilotStatus, PayloadEvent, SystemHealth};
pub use telemetry::TelemetryRecord;
