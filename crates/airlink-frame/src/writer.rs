use airlink_transport::Transport;
use bytes::BytesMut;
use tracing::trace;

use crate::codec::{encode_frame, Frame, FRAME_OVERHEAD, MAX_PAYLOAD};
use crate::error::Result;

/// Frames record payloads and hands them to a [`Transport`].
///
/// The encode buffer is reused across sends.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Transport> FrameWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(MAX_PAYLOAD + FRAME_OVERHEAD),
        }
    }

    /// Write a complete frame.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<usize> {
        self.send(frame.packet_id, frame.payload.as_ref())
    }

    /// Encode `payload` under `packet_id` and write it in one transport call.
    ///
    /// Returns what the transport reported as accepted. A socket that would
    /// block reports 0 and the frame is not retried.
    pub fn send(&mut self, packet_id: u8, payload: &[u8]) -> Result<usize> {
        self.buf.clear();
        encode_frame(packet_id, payload, &mut self.buf)?;

        let written = self.inner.write(&self.buf)?;
        trace!(packet_id, len = self.buf.len(), written, "frame written");
        Ok(written)
    }

    /// Borrow the underlying transport.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying transport.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner transport.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use airlink_transport::TransportError;

    use super::*;
    use crate::error::FrameError;
    use crate::reader::FrameReader;

    #[derive(Default)]
    struct MemoryTransport {
        written: Vec<u8>,
        closed: bool,
    }

    impl Transport for MemoryTransport {
        fn write(&mut self, bytes: &[u8]) -> airlink_transport::Result<usize> {
            if self.closed {
                return Err(TransportError::Closed);
            }
            self.written.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn read(&mut self, _buf: &mut [u8]) -> airlink_transport::Result<usize> {
            Ok(0)
        }

        fn is_open(&self) -> bool {
            !self.closed
        }
    }

    #[test]
    fn send_writes_one_whole_frame() {
        let mut writer = FrameWriter::new(MemoryTransport::default());
        let written = writer.send(14, b"air-data").unwrap();

        assert_eq!(written, 8 + FRAME_OVERHEAD);
        assert_eq!(writer.get_ref().written.len(), written);
    }

    #[test]
    fn frames_read_back_in_order() {
        let mut writer = FrameWriter::new(MemoryTransport::default());
        writer.send(0, b"gps").unwrap();
        writer.write_frame(&Frame::new(13, &b"health"[..])).unwrap();

        let bytes = writer.into_inner().written;
        let mut reader = FrameReader::new(Cursor::new(bytes));
        let f1 = reader.read_frame().unwrap();
        let f2 = reader.read_frame().unwrap();

        assert_eq!((f1.packet_id, f1.payload.as_ref()), (0, b"gps".as_ref()));
        assert_eq!((f2.packet_id, f2.payload.as_ref()), (13, b"health".as_ref()));
    }

    #[test]
    fn oversize_payload_never_reaches_transport() {
        let mut writer = FrameWriter::new(MemoryTransport::default());
        let err = writer.send(8, &[0u8; 300]).unwrap_err();

        assert!(matches!(err, FrameError::PayloadTooLarge { .. }));
        assert!(writer.get_ref().written.is_empty());
    }

    #[test]
    fn transport_error_is_wrapped() {
        let mut writer = FrameWriter::new(MemoryTransport {
            closed: true,
            ..Default::default()
        });
        let err = writer.send(3, b"x").unwrap_err();
        assert!(matches!(
            err,
            FrameError::Transport(TransportError::Closed)
        ));
    }

    #[test]
    fn borrowed_transport_can_be_framed() {
        let mut transport = MemoryTransport::default();
        FrameWriter::new(&mut transport).send(4, b"pilot").unwrap();
        assert_eq!(transport.written.len(), 5 + FRAME_OVERHEAD);
    }
}
