use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::checksum::{Checksum, DefaultChecksum};
use crate::error::{FrameError, Result};

/// Sync bytes that open every frame.
pub const SYNC: [u8; 2] = [0x93, 0xE0];

/// Frame header: sync (2) + packet id (1) + length (1) = 4 bytes.
pub const HEADER_SIZE: usize = 4;

/// Trailing checksum size.
pub const CHECKSUM_SIZE: usize = 2;

/// Bytes a frame adds around its payload.
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + CHECKSUM_SIZE;

/// Largest payload the one-byte length field can describe.
pub const MAX_PAYLOAD: usize = u8::MAX as usize;

/// A framed record payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Packet id naming the payload layout.
    pub packet_id: u8,
    /// The record bytes.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(packet_id: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            packet_id,
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame.
    pub fn wire_size(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────┬────────┬────────┬──────────────┬──────────────┐
/// │ Sync (2) │ Id (1) │ Len(1) │ Payload      │ Checksum (2) │
/// │ 93 E0    │        │        │ (Len bytes)  │ c0 c1        │
/// └──────────┴────────┴────────┴──────────────┴──────────────┘
/// ```
pub fn encode_frame(packet_id: u8, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    encode_frame_with::<DefaultChecksum>(packet_id, payload, dst)
}

/// [`encode_frame`] with an explicit checksum algorithm.
pub fn encode_frame_with<C: Checksum>(
    packet_id: u8,
    payload: &[u8],
    dst: &mut BytesMut,
) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    let length = payload.len() as u8;
    dst.reserve(FRAME_OVERHEAD + payload.len());
    dst.put_slice(&SYNC);
    dst.put_u8(packet_id);
    dst.put_u8(length);
    dst.put_slice(payload);
    dst.put_slice(&C::compute(packet_id, length, payload));
    Ok(())
}

/// Decode the next frame from a byte stream buffer.
///
/// Bytes ahead of the next sync pair are discarded. Returns `Ok(None)` when
/// the buffer does not hold a complete frame yet. A checksum failure consumes
/// the first sync byte of the bad frame, so calling again resumes the search
/// right after it.
pub fn decode_frame(src: &mut BytesMut) -> Result<Option<Frame>> {
    decode_frame_with::<DefaultChecksum>(src)
}

/// [`decode_frame`] with an explicit checksum algorithm.
pub fn decode_frame_with<C: Checksum>(src: &mut BytesMut) -> Result<Option<Frame>> {
    if !resync(src) {
        return Ok(None);
    }
    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    let packet_id = src[2];
    let length = src[3];
    let payload_len = length as usize;
    let total = FRAME_OVERHEAD + payload_len;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    let payload_end = HEADER_SIZE + payload_len;
    let expected = C::compute(packet_id, length, &src[HEADER_SIZE..payload_end]);
    let actual = [src[payload_end], src[payload_end + 1]];
    if expected != actual {
        src.advance(1);
        return Err(FrameError::ChecksumMismatch { expected, actual });
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();
    src.advance(CHECKSUM_SIZE);

    Ok(Some(Frame { packet_id, payload }))
}

/// Verify a buffer holding exactly one frame.
pub fn verify_frame(bytes: &[u8]) -> Result<Frame> {
    verify_frame_with::<DefaultChecksum>(bytes)
}

/// [`verify_frame`] with an explicit checksum algorithm.
pub fn verify_frame_with<C: Checksum>(bytes: &[u8]) -> Result<Frame> {
    if bytes.len() < FRAME_OVERHEAD {
        return Err(FrameError::LengthMismatch {
            declared: bytes.get(3).map_or(0, |&len| len as usize),
            actual: bytes.len().saturating_sub(FRAME_OVERHEAD),
        });
    }
    if bytes[..2] != SYNC {
        return Err(FrameError::InvalidSync);
    }

    let packet_id = bytes[2];
    let length = bytes[3];
    let actual_len = bytes.len() - FRAME_OVERHEAD;
    if length as usize != actual_len {
        return Err(FrameError::LengthMismatch {
            declared: length as usize,
            actual: actual_len,
        });
    }

    let payload = &bytes[HEADER_SIZE..HEADER_SIZE + actual_len];
    let expected = C::compute(packet_id, length, payload);
    let actual = [bytes[bytes.len() - 2], bytes[bytes.len() - 1]];
    if expected != actual {
        return Err(FrameError::ChecksumMismatch { expected, actual });
    }

    Ok(Frame::new(packet_id, Bytes::copy_from_slice(payload)))
}

// Drop bytes until the buffer starts with the sync pair. Returns false when
// no sync pair is present (a trailing first sync byte is kept).
fn resync(src: &mut BytesMut) -> bool {
    let found = src.windows(2).position(|pair| pair == &SYNC[..]);
    match found {
        Some(0) => true,
        Some(offset) => {
            debug!(skipped = offset, "discarding bytes ahead of frame sync");
            src.advance(offset);
            true
        }
        None => {
            let keep = usize::from(src.last() == Some(&SYNC[0]));
            let skipped = src.len() - keep;
            if skipped > 0 {
                debug!(skipped, "discarding bytes with no frame sync");
                src.advance(skipped);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::Fletcher8;

    /// Big-endian 16-bit sum of every checksummed byte.
    struct Sum16;

    impl Checksum for Sum16 {
        const NAME: &'static str = "sum16";

        fn compute(packet_id: u8, length: u8, payload: &[u8]) -> [u8; 2] {
            let sum = [packet_id, length]
                .iter()
                .chain(payload)
                .fold(0u16, |sum, &b| sum.wrapping_add(u16::from(b)));
            sum.to_be_bytes()
        }
    }

    fn framed(packet_id: u8, payload: &[u8]) -> BytesMut {
        let mut buf = BytesMut::new();
        encode_frame(packet_id, payload, &mut buf).unwrap();
        buf
    }

    #[test]
    fn test_encode_layout() {
        let buf = framed(3, &[1, 2]);
        assert_eq!(buf.len(), FRAME_OVERHEAD + 2);
        assert_eq!(&buf[..], &[0x93, 0xE0, 3, 2, 1, 2, 8, 22]);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let mut buf = framed(0, b"gps-fix-bytes");
        let frame = decode_frame(&mut buf).unwrap().unwrap();

        assert_eq!(frame.packet_id, 0);
        assert_eq!(frame.payload.as_ref(), b"gps-fix-bytes");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_payload_too_large() {
        let mut buf = BytesMut::new();
        let err = encode_frame(0, &[0u8; 256], &mut buf).unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { size: 256, max: 255 }));
        assert!(buf.is_empty());

        encode_frame(0, &[0u8; 255], &mut buf).unwrap();
        assert_eq!(buf.len(), 255 + FRAME_OVERHEAD);
    }

    #[test]
    fn test_decode_incomplete_header() {
        let mut buf = BytesMut::from(&[0x93, 0xE0, 0x00][..]);
        assert!(decode_frame(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_decode_incomplete_payload() {
        let mut buf = framed(2, b"hello");
        buf.truncate(HEADER_SIZE + 2);
        assert!(decode_frame(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_resync_skips_garbage() {
        let mut buf = BytesMut::from(&[0x00, 0x93, 0x11, 0xFF][..]);
        buf.extend_from_slice(&framed(8, &[7, 7]));

        let frame = decode_frame(&mut buf).unwrap().unwrap();
        assert_eq!(frame.packet_id, 8);
        assert_eq!(frame.payload.as_ref(), &[7, 7]);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_garbage_without_sync_is_dropped_keeping_partial_sync() {
        let mut buf = BytesMut::from(&[0x01, 0x02, 0x93][..]);
        assert!(decode_frame(&mut buf).unwrap().is_none());
        assert_eq!(&buf[..], &[0x93]);
    }

    #[test]
    fn test_checksum_failure_then_recovery() {
        let mut bad = framed(4, b"abc");
        let last = bad.len() - 1;
        bad[last] ^= 0x01;
        let mut buf = bad;
        buf.extend_from_slice(&framed(4, b"xyz"));

        let err = decode_frame(&mut buf).unwrap_err();
        assert!(matches!(err, FrameError::ChecksumMismatch { .. }));

        let frame = decode_frame(&mut buf).unwrap().unwrap();
        assert_eq!(frame.payload.as_ref(), b"xyz");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_multiple_frames() {
        let mut buf = framed(0, b"first");
        buf.extend_from_slice(&framed(15, b"second"));

        let f1 = decode_frame(&mut buf).unwrap().unwrap();
        let f2 = decode_frame(&mut buf).unwrap().unwrap();
        assert_eq!((f1.packet_id, f1.payload.as_ref()), (0, b"first".as_ref()));
        assert_eq!((f2.packet_id, f2.payload.as_ref()), (15, b"second".as_ref()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_empty_payload() {
        let mut buf = framed(8, b"");
        let frame = decode_frame(&mut buf).unwrap().unwrap();
        assert_eq!(frame.packet_id, 8);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_verify_accepts_clean_frame() {
        let buf = framed(13, &[1, 2, 3, 4, 5]);
        let frame = verify_frame(&buf).unwrap();
        assert_eq!(frame, Frame::new(13, vec![1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_verify_rejects_every_single_bit_flip() {
        let payload: Vec<u8> = (0u8..44).map(|b| b.wrapping_mul(37)).collect();
        let clean = framed(0, &payload);

        for byte in 0..clean.len() {
            for bit in 0..8 {
                let mut corrupt = clean.to_vec();
                corrupt[byte] ^= 1 << bit;
                assert!(
                    verify_frame(&corrupt).is_err(),
                    "flip of bit {bit} in byte {byte} went undetected"
                );
            }
        }
    }

    #[test]
    fn test_verify_length_flip_is_length_mismatch() {
        let mut corrupt = framed(0, &[0u8; 10]).to_vec();
        corrupt[3] ^= 0x04;
        assert!(matches!(
            verify_frame(&corrupt),
            Err(FrameError::LengthMismatch { declared: 14, actual: 10 })
        ));
    }

    #[test]
    fn test_verify_truncated() {
        assert!(matches!(
            verify_frame(&[0x93, 0xE0, 0]),
            Err(FrameError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_alternate_checksum_roundtrip() {
        let mut buf = BytesMut::new();
        encode_frame_with::<Sum16>(12, &[0xFF, 0xFF, 1], &mut buf).unwrap();
        // 12 + 3 + 255 + 255 + 1 = 526
        assert_eq!(&buf[buf.len() - 2..], &[0x02, 0x0E]);

        let frame = verify_frame_with::<Sum16>(&buf).unwrap();
        assert_eq!(frame, Frame::new(12, vec![0xFF, 0xFF, 1]));

        let mut stream = buf.clone();
        let frame = decode_frame_with::<Sum16>(&mut stream).unwrap().unwrap();
        assert_eq!(frame.packet_id, 12);
        assert!(stream.is_empty());
    }

    #[test]
    fn test_checksum_algorithms_do_not_cross_validate() {
        let mut sum16 = BytesMut::new();
        encode_frame_with::<Sum16>(12, &[0xFF, 0xFF, 1], &mut sum16).unwrap();
        let fletcher = framed(12, &[0xFF, 0xFF, 1]);

        assert!(matches!(
            verify_frame_with::<Fletcher8>(&sum16),
            Err(FrameError::ChecksumMismatch { .. })
        ));
        assert!(matches!(
            verify_frame_with::<Sum16>(&fletcher),
            Err(FrameError::ChecksumMismatch { .. })
        ));
        let mut stream = sum16.clone();
        assert!(matches!(
            decode_frame(&mut stream),
            Err(FrameError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_frame_wire_size() {
        let frame = Frame::new(1, Bytes::from_static(b"test"));
        assert_eq!(frame.wire_size(), FRAME_OVERHEAD + 4);
    }
}
