/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload does not fit the one-byte length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The frame does not start with the sync bytes.
    #[error("invalid frame sync (expected 0x93 0xE0)")]
    InvalidSync,

    /// The declared payload length disagrees with the bytes present.
    #[error("frame length mismatch (declared {declared}, found {actual})")]
    LengthMismatch { declared: usize, actual: usize },

    /// The trailing checksum does not match the frame contents.
    #[error("frame checksum mismatch (expected {expected:02x?}, found {actual:02x?})")]
    ChecksumMismatch { expected: [u8; 2], actual: [u8; 2] },

    /// The transport failed while sending a frame.
    #[error("frame transport error: {0}")]
    Transport(#[from] airlink_transport::TransportError),

    /// An I/O error occurred while reading frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
