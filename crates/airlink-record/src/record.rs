use bytes::BytesMut;

use crate::error::{RecordError, Result};
use crate::kind::RecordKind;

/// A fixed-layout telemetry record.
///
/// Implementors write and read their fields in wire order; the provided
/// [`Record::encode`] and [`Record::decode`] handle sizing and bounds.
pub trait Record: Sized {
    /// Which record layout this is.
    const KIND: RecordKind;

    /// Append the fields in wire order (little-endian).
    fn put_fields(&self, dst: &mut BytesMut);

    /// Read the fields in wire order. `src` holds at least
    /// `Self::KIND.payload_len()` bytes.
    fn get_fields(src: &mut &[u8]) -> Self;

    /// Append this record's payload to `dst`.
    fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(Self::KIND.payload_len());
        self.put_fields(dst);
    }

    /// Decode a payload produced by [`Record::encode`].
    ///
    /// Fails with [`RecordError::Truncated`] before reading anything when the
    /// payload is shorter than the layout. Trailing bytes are ignored.
    fn decode(bytes: &[u8]) -> Result<Self> {
        let expected = Self::KIND.payload_len();
        if bytes.len() < expected {
            return Err(RecordError::Truncated {
                kind: Self::KIND,
                expected,
                actual: bytes.len(),
            });
        }
        let mut src = &bytes[..expected];
        Ok(Self::get_fields(&mut src))
    }
}
