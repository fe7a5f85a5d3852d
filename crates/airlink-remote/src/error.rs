use airlink_frame::FrameError;
use airlink_transport::TransportError;

/// Why a received command line was discarded before execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// Too short to hold a checksum.
    #[error("command line too short ({0} bytes)")]
    TooShort(usize),

    /// The trailing checksum does not match the command text.
    #[error("command checksum mismatch (computed {computed:02X}, received {received:?})")]
    ChecksumMismatch { computed: u8, received: String },

    /// The command text is not valid UTF-8.
    #[error("command line is not valid UTF-8")]
    NotUtf8,

    /// No comma separates the sequence number from the command.
    #[error("command line has no sequence number")]
    MissingSequence,

    /// The sequence number is not an integer.
    #[error("invalid sequence number {0:?}")]
    InvalidSequence(String),
}

/// Why a validated command could not be executed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The command text is empty.
    #[error("empty command")]
    Empty,

    /// The first token names no known command.
    #[error("unknown command {0:?}")]
    UnknownKeyword(String),

    /// The command has the wrong number of arguments.
    #[error("{keyword} expects {expected} arguments, got {actual}")]
    Arity {
        keyword: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// A numeric argument did not parse.
    #[error("invalid number {token:?}")]
    InvalidNumber { token: String },

    /// A sub-command selector (`ap` target, `la` mode) is not known.
    #[error("unknown target {0:?}")]
    UnknownTarget(String),
}

/// Errors surfaced by remote link setup.
///
/// The running link never returns these: transport and command faults are
/// logged and counted instead.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Command-level error.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// The configuration is unusable.
    #[error("invalid config: {0}")]
    Config(String),

    /// Reading the configuration file failed.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RemoteError>;
