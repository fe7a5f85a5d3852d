//! The remote (ground) link of the airlink telemetry system.
//!
//! Downlink: [`TelemetryLink`] decimates each record kind with a
//! [`Throttle`], encodes and frames the record, and writes it to the
//! transport.
//!
//! Uplink: [`CommandChannel`] assembles `seq,command*HH` lines, verifies the
//! checksum, drops retransmissions and dispatches the typed [`Command`] to
//! the vehicle through [`Effectors`].
//!
//! [`RemoteLink`] ties both halves to one transport.
//!
//! ```
//! use airlink_remote::{sign, Command, CommandChannel, CommandOutcome, Effectors, PropertyStore};
//!
//! #[derive(Default)]
//! struct Props(Vec<(String, f64)>);
//!
//! impl PropertyStore for Props {
//!     fn get_f64(&self, _: &str) -> Option<f64> { None }
//!     fn set_f64(&mut self, path: &str, value: f64) { self.0.push((path.into(), value)); }
//!     fn set_bool(&mut self, _: &str, _: bool) {}
//!     fn set_string(&mut self, _: &str, _: &str) {}
//! }
//!
//! let mut props = Props::default();
//! let mut channel = CommandChannel::default();
//! channel.feed(format!("{}\n", sign("12,ap,speed-kt,27")).as_bytes());
//!
//! let line = channel.next_line().unwrap();
//! let outcome = channel.process_line(&line, &mut Effectors::new(&mut props));
//! assert!(matches!(outcome, CommandOutcome::Executed { sequence: 12, command: Command::AutopilotTarget { .. } }));
//! assert_eq!(props.0, [("/autopilot/settings/target-speed-kt".to_string(), 27.0)]);
//! ```

pub mod channel;
pub mod command;
pub mod config;
pub mod effectors;
pub mod envelope;
pub mod error;
pub mod line;
pub mod link;
pub mod remote;
pub mod throttle;

pub use channel::{ChannelStats, CommandChannel, CommandOutcome};
pub use command::{ApTarget, Command, GainUpdate, LookAt, Waypoint, AGL_UNSET_M};
pub use config::{RemoteLinkConfig, SkipConfig, DEFAULT_MAX_COMMAND_LEN};
pub use effectors::{Effectors, GainStore, PiGains, PidGains, PropertyStore, RouteManager};
pub use envelope::{nmea_checksum, sign, Envelope};
pub use error::{CommandError, EnvelopeError, RemoteError, Result};
pub use line::LineAssembler;
pub use link::{LinkStats, TelemetryLink};
pub use remote::RemoteLink;
pub use throttle::Throttle;
