//! Frame checksum.
//!
//! Producer and consumer must agree on the algorithm byte for byte. It sits
//! behind [`Checksum`] so the framing code does not depend on which one a
//! given ground station expects.

/// A 2-byte checksum over a frame's id, length and payload.
pub trait Checksum {
    /// Short algorithm name for diagnostics.
    const NAME: &'static str;

    /// Checksum bytes in wire order.
    fn compute(packet_id: u8, length: u8, payload: &[u8]) -> [u8; 2];
}

/// Two running 8-bit sums: `c0 += byte; c1 += c0` over every checksummed byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fletcher8;

impl Checksum for Fletcher8 {
    const NAME: &'static str = "fletcher8";

    fn compute(packet_id: u8, length: u8, payload: &[u8]) -> [u8; 2] {
        let mut c0: u8 = 0;
        let mut c1: u8 = 0;
        for &byte in [packet_id, length].iter().chain(payload) {
            c0 = c0.wrapping_add(byte);
            c1 = c1.wrapping_add(c0);
        }
        [c0, c1]
    }
}

/// The checksum used on the wire.
pub type DefaultChecksum = Fletcher8;

/// Checksum a frame with the wire algorithm.
pub fn frame_checksum(packet_id: u8, length: u8, payload: &[u8]) -> [u8; 2] {
    DefaultChecksum::compute(packet_id, length, payload)
}
