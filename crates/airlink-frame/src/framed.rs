use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use crate::codec::{decode_frame, encode_frame, Frame};
use crate::error::FrameError;

/// `tokio_util` codec for ground-side tools reading the telemetry stream.
///
/// Corrupt frames are skipped the same way [`crate::FrameReader`] skips them.
#[derive(Debug, Default, Clone)]
pub struct TelemetryCodec {
    dropped: u64,
}

impl TelemetryCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames discarded because their checksum did not match.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Decoder for TelemetryCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, FrameError> {
        loop {
            match decode_frame(src) {
                Err(FrameError::ChecksumMismatch { .. }) => {
                    self.dropped += 1;
                    warn!(dropped = self.dropped, "dropping corrupt frame");
                }
                other => return other,
            }
        }
    }
}

impl Encoder<Frame> for TelemetryCodec {
    type Error = FrameError;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), FrameError> {
        encode_frame(item.packet_id, &item.payload, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoder_skips_corrupt_frames() {
        let mut codec = TelemetryCodec::new();
        let mut buf = BytesMut::new();
        codec.encode(Frame::new(3, &b"first"[..]), &mut buf).unwrap();
        let last = buf.len() - 1;
        buf[last] ^= 0xFF;
        codec.encode(Frame::new(4, &b"second"[..]), &mut buf).unwrap();

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame.packet_id, 4);
        assert_eq!(codec.dropped(), 1);
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }
}
