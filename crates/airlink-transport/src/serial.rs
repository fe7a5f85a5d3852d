use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use bytes::{Buf, BytesMut};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_BYTES_PER_FRAME, SERIAL_BAUD};
use crate::error::{Result, TransportError};
use crate::traits::{Connect, Transport};

const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Opens a serial device at 115200 8N1 with no flow control.
#[derive(Debug, Clone)]
pub struct SerialConnector {
    device: String,
}

impl SerialConnector {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
        }
    }
}

impl Connect for SerialConnector {
    type Stream = Box<dyn SerialPort>;

    fn connect(&mut self) -> Result<Self::Stream> {
        // Short timeout: reads and writes must not stall the telemetry cycle.
        let port = serialport::new(&self.device, SERIAL_BAUD)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(1))
            .open()?;
        info!(device = %self.device, baud = SERIAL_BAUD, "opened serial link");
        Ok(port)
    }

    fn target(&self) -> String {
        self.device.clone()
    }
}

/// Buffered serial link.
///
/// `write` appends to a FIFO and makes one bounded flush attempt; each flush
/// hands at most `bytes_per_frame` bytes to the port. Once opened the port is
/// never closed by this layer.
pub struct SerialLink<C: Connect = SerialConnector> {
    connector: C,
    port: Option<C::Stream>,
    pending: BytesMut,
    bytes_per_frame: usize,
}

impl<C: Connect> SerialLink<C> {
    /// Create a closed link. Call [`SerialLink::open`] or just write.
    pub fn new(connector: C, bytes_per_frame: usize) -> Self {
        let bytes_per_frame = if bytes_per_frame == 0 {
            DEFAULT_BYTES_PER_FRAME
        } else {
            bytes_per_frame
        };
        Self {
            connector,
            port: None,
            pending: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            bytes_per_frame,
        }
    }

    /// Open the port if it is not open yet.
    pub fn open(&mut self) -> Result<()> {
        if self.port.is_none() {
            self.port = Some(self.connector.connect()?);
        }
        Ok(())
    }

    /// Bytes waiting in the FIFO.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Maximum bytes handed to the port per flush.
    pub fn bytes_per_frame(&self) -> usize {
        self.bytes_per_frame
    }

    /// Borrow the open port, if any.
    pub fn port(&self) -> Option<&C::Stream> {
        self.port.as_ref()
    }

    /// Write at most `bytes_per_frame` bytes from the front of the FIFO.
    pub fn flush_pending(&mut self) -> Result<usize> {
        let Some(port) = self.port.as_mut() else {
            return Ok(0);
        };

        let len = self.pending.len().min(self.bytes_per_frame);
        if len == 0 {
            return Ok(0);
        }

        match port.write(&self.pending[..len]) {
            Ok(n) => {
                self.pending.advance(n);
                Ok(n)
            }
            Err(err) if is_transient(err.kind()) => Ok(0),
            Err(err) => Err(TransportError::Io(err)),
        }
    }
}

impl<C: Connect> Transport for SerialLink<C> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        if self.port.is_none() {
            if let Err(err) = self.open() {
                debug!(target = %self.connector.target(), %err, "serial link still closed");
            }
        }

        self.pending.extend_from_slice(bytes);
        if let Err(err) = self.flush_pending() {
            warn!(%err, pending = self.pending.len(), "serial flush failed");
        }
        Ok(bytes.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let Some(port) = self.port.as_mut() else {
            return Ok(0);
        };
        match port.read(buf) {
            Ok(n) => Ok(n),
            Err(err) if is_transient(err.kind()) => Ok(0),
            Err(err) => Err(TransportError::Io(err)),
        }
    }

    fn poll_flush(&mut self) -> Result<usize> {
        self.flush_pending()
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }
}

impl<C: Connect> std::fmt::Debug for SerialLink<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink")
            .field("target", &self.connector.target())
            .field("open", &self.port.is_some())
            .field("pending", &self.pending.len())
            .field("bytes_per_frame", &self.bytes_per_frame)
            .finish()
    }
}

fn is_transient(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
    )
}
