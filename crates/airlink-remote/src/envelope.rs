//! Command line envelope: `<sequence>,<command>*<HH>`.
//!
//! `HH` is the XOR of every byte before the `*`, as two uppercase hex
//! digits. The character in the `*` position is not checked.

use crate::error::EnvelopeError;

/// A checksum-verified command with its sequence number split off.
///
/// Ground stations count sequences as unsigned 32-bit values; `i64` holds
/// all of them and still parses a signed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    pub sequence: i64,
    pub command: &'a str,
}

/// XOR of all bytes in `body`.
pub fn nmea_checksum(body: &[u8]) -> u8 {
    body.iter().fold(0, |sum, byte| sum ^ byte)
}

/// Append `*HH` to `body`.
pub fn sign(body: &str) -> String {
    format!("{body}*{:02X}", nmea_checksum(body.as_bytes()))
}

/// Verify a received line (without its newline) and split off the sequence.
pub fn open(line: &[u8]) -> Result<Envelope<'_>, EnvelopeError> {
    if line.len() < 4 {
        return Err(EnvelopeError::TooShort(line.len()));
    }

    let (rest, received) = line.split_at(line.len() - 2);
    let body = &rest[..rest.len() - 1];
    let computed = nmea_checksum(body);
    if received != format!("{computed:02X}").as_bytes() {
        return Err(EnvelopeError::ChecksumMismatch {
            computed,
            received: String::from_utf8_lossy(received).into_owned(),
        });
    }

    let body = std::str::from_utf8(body).map_err(|_| EnvelopeError::NotUtf8)?;
    let (sequence, command) = body
        .split_once(',')
        .ok_or(EnvelopeError::MissingSequence)?;
    let sequence = sequence
        .trim()
        .parse()
        .map_err(|_| EnvelopeError::InvalidSequence(sequence.to_string()))?;

    Ok(Envelope { sequence, command })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_xor_of_body() {
        // '4' ^ '2' ^ ',' ^ 'h' ^ 'b'
        assert_eq!(nmea_checksum(b"42,hb"), 0x20);
        assert_eq!(sign("42,hb"), "42,hb*20");
        assert_eq!(nmea_checksum(b""), 0);
    }

    #[test]
    fn opens_signed_line() {
        let line = sign("17,ap,agl-ft,400");
        let envelope = open(line.as_bytes()).unwrap();
        assert_eq!(envelope.sequence, 17);
        assert_eq!(envelope.command, "ap,agl-ft,400");
    }

    #[test]
    fn tampered_checksum_rejected() {
        assert_eq!(
            open(b"42,hb*21"),
            Err(EnvelopeError::ChecksumMismatch {
                computed: 0x20,
                received: "21".to_string(),
            })
        );
    }

    #[test]
    fn tampered_body_rejected() {
        assert!(matches!(
            open(b"43,hb*20"),
            Err(EnvelopeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn lowercase_checksum_rejected() {
        assert!(matches!(
            open(sign("3,ap,speed-kt,25").to_lowercase().as_bytes()),
            Err(EnvelopeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn separator_character_is_not_checked() {
        let line = sign("42,hb").replace('*', "#");
        assert_eq!(open(line.as_bytes()).unwrap().sequence, 42);
    }

    #[test]
    fn short_line_rejected() {
        assert_eq!(open(b"*00"), Err(EnvelopeError::TooShort(3)));
    }

    #[test]
    fn missing_sequence_rejected() {
        let line = sign("hb");
        assert_eq!(open(line.as_bytes()), Err(EnvelopeError::MissingSequence));
    }

    #[test]
    fn full_u32_sequence_range_accepted() {
        let line = sign("4294967295,hb");
        assert_eq!(open(line.as_bytes()).unwrap().sequence, i64::from(u32::MAX));
    }

    #[test]
    fn non_numeric_sequence_rejected() {
        let line = sign("x,hb");
        assert_eq!(
            open(line.as_bytes()),
            Err(EnvelopeError::InvalidSequence("x".to_string()))
        );
    }

    #[test]
    fn invalid_utf8_rejected_without_panicking() {
        let mut line = vec![b'1', b',', 0xE2, 0x82];
        let sum = nmea_checksum(&line);
        line.extend_from_slice(format!("*{sum:02X}").as_bytes());
        assert_eq!(open(&line), Err(EnvelopeError::NotUtf8));
    }
}
