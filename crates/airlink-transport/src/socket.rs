use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;

use tracing::{debug, info, warn};

use crate::error::{Result, TransportError};
use crate::traits::{Connect, Transport};

/// Connects to a TCP relay and switches the stream to non-blocking mode.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    host: String,
    port: u16,
}

impl TcpConnector {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Connect for TcpConnector {
    type Stream = TcpStream;

    fn connect(&mut self) -> Result<TcpStream> {
        let stream = TcpStream::connect((self.host.as_str(), self.port)).map_err(|source| {
            TransportError::Open {
                target: self.target(),
                source,
            }
        })?;
        stream.set_nonblocking(true)?;
        stream.set_nodelay(true)?;
        info!(host = %self.host, port = self.port, "connected to link relay");
        Ok(stream)
    }

    fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Network link with lazy reconnection.
///
/// A write that fails because the remote end went away marks the session
/// closed; the next write reconnects before sending. Writes that would block
/// report `Ok(0)`.
pub struct SocketLink<C: Connect = TcpConnector> {
    connector: C,
    stream: Option<C::Stream>,
    ever_connected: bool,
    reconnects: u64,
}

impl<C: Connect> SocketLink<C> {
    /// Create a closed link. The first write connects.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            stream: None,
            ever_connected: false,
            reconnects: 0,
        }
    }

    /// Connect now if the session is closed.
    pub fn open(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }
        self.stream = Some(self.connector.connect()?);
        if self.ever_connected {
            self.reconnects += 1;
            info!(target = %self.connector.target(), "link session reopened");
        }
        self.ever_connected = true;
        Ok(())
    }

    /// Drop the connection. The next write reopens it.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            debug!(target = %self.connector.target(), "link session closed");
        }
    }

    /// Number of successful reconnects after a close.
    pub fn reconnects(&self) -> u64 {
        self.reconnects
    }

    /// Borrow the connector.
    pub fn connector(&self) -> &C {
        &self.connector
    }
}

impl<C: Connect> Transport for SocketLink<C> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        self.open()?;
        let Some(stream) = self.stream.as_mut() else {
            return Err(TransportError::Closed);
        };

        match stream.write(bytes) {
            Ok(n) => {
                if n < bytes.len() {
                    debug!(written = n, len = bytes.len(), "short socket write");
                }
                Ok(n)
            }
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                Ok(0)
            }
            Err(err) if is_disconnect(err.kind()) => {
                warn!(target = %self.connector.target(), %err, "remote end closed link");
                self.stream = None;
                Err(TransportError::Closed)
            }
            Err(err) => Err(TransportError::Io(err)),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(0);
        };
        match stream.read(buf) {
            Ok(n) => Ok(n),
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                Ok(0)
            }
            Err(err) if is_disconnect(err.kind()) => {
                warn!(target = %self.connector.target(), %err, "remote end closed link");
                self.stream = None;
                Ok(0)
            }
            Err(err) => Err(TransportError::Io(err)),
        }
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

impl<C: Connect> std::fmt::Debug for SocketLink<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketLink")
            .field("target", &self.connector.target())
            .field("open", &self.stream.is_some())
            .field("reconnects", &self.reconnects)
            .finish()
    }
}

// Rust binaries ignore SIGPIPE, so a dead peer surfaces as BrokenPipe here.
fn is_disconnect(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::BrokenPipe | ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted
    )
}
