//! Byte-channel transports for the airlink telemetry link.
//!
//! Two interchangeable channels sit behind the [`Transport`] trait:
//! - [`SerialLink`]: a buffered serial radio. Writes land in a FIFO that is
//!   drained a bounded chunk at a time.
//! - [`SocketLink`]: a non-blocking TCP connection to a relay server that is
//!   reopened lazily after the remote end goes away.
//!
//! [`Link`] picks one of the two from a [`TransportConfig`] at start-up.
//! This is the lowest layer of airlink; framing and commands build on it.

pub mod config;
pub mod error;
pub mod link;
pub mod serial;
pub mod socket;
pub mod traits;

pub use config::{LinkKind, TransportConfig, DEFAULT_BYTES_PER_FRAME, SERIAL_BAUD};
pub use error::{Result, TransportError};
pub use link::Link;
pub use serial::{SerialConnector, SerialLink};
pub use socket::{SocketLink, TcpConnector};
pub use traits::{Connect, Transport};
