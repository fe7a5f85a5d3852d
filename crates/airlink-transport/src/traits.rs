use std::io::{Read, Write};

use crate::error::Result;

/// A half-duplex byte channel to the ground station.
///
/// Implementations never block the telemetry cycle for long: a write that
/// cannot make progress returns `Ok(0)` ("nothing sent this cycle"), and a
/// read with no data available returns `Ok(0)`.
pub trait Transport {
    /// Queue or send `bytes`, returning how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> Result<usize>;

    /// Read whatever is available into `buf`, returning the byte count.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Push buffered output toward the device. Returns bytes written.
    fn poll_flush(&mut self) -> Result<usize> {
        Ok(0)
    }

    /// Whether the underlying endpoint is currently open.
    fn is_open(&self) -> bool;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        (**self).write(bytes)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn poll_flush(&mut self) -> Result<usize> {
        (**self).poll_flush()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}

/// Opens the raw stream behind a transport. Called again after a failure.
pub trait Connect {
    /// The connected byte stream.
    type Stream: Read + Write;

    /// Open a fresh stream to the endpoint.
    fn connect(&mut self) -> Result<Self::Stream>;

    /// Human-readable endpoint name for diagnostics.
    fn target(&self) -> String;
}
