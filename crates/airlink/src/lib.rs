//! UAV onboard telemetry link.
//!
//! airlink encodes vehicle state into compact fixed-layout records, frames
//! them with sync bytes and a checksum, decimates them per record type and
//! writes them to a serial radio or a TCP relay. In the other direction it
//! reads checksummed text commands from the ground station and applies them.
//!
//! # Crate Structure
//!
//! - [`transport`]: serial and TCP byte channels
//! - [`frame`]: sync/id/length/checksum framing
//! - [`record`]: the nine telemetry record layouts
//! - [`remote`]: throttle, command channel and the combined link (behind the
//!   `remote` feature, on by default)

/// Re-export transport types.
pub mod transport {
    pub use airlink_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use airlink_frame::*;
}

/// Re-export record types.
pub mod record {
    pub use airlink_record::*;
}

/// Re-export remote link types (requires `remote` feature).
#[cfg(feature = "remote")]
pub mod remote {
    pub use airlink_remote::*;
}
