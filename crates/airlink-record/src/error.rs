use crate::kind::RecordKind;

/// Errors that can occur while decoding telemetry records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The payload is shorter than the record layout.
    #[error("{kind} record truncated ({actual} bytes, layout needs {expected})")]
    Truncated {
        kind: RecordKind,
        expected: usize,
        actual: usize,
    },

    /// The packet id does not name a known record layout.
    #[error("unknown packet id {0}")]
    UnknownPacket(u8),
}

pub type Result<T> = std::result::Result<T, RecordError>;
