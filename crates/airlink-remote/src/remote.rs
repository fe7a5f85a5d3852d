use airlink_record::TelemetryRecord;
use airlink_transport::{Link, Transport};
use tracing::info;

use crate::channel::{CommandChannel, CommandOutcome};
use crate::config::RemoteLinkConfig;
use crate::effectors::Effectors;
use crate::error::Result;
use crate::link::TelemetryLink;

/// Both directions of the ground link over one transport.
///
/// Downlinked navigation and autopilot records are stamped with the last
/// accepted uplink sequence number (0 until the first command), which is how
/// the ground station learns that a command arrived.
pub struct RemoteLink<T = Link> {
    telemetry: TelemetryLink<T>,
    commands: CommandChannel,
}

impl RemoteLink<Link> {
    /// Open the configured transport.
    ///
    /// Only configuration errors fail here. An endpoint that cannot be
    /// reached yet is retried by the transport on later writes.
    pub fn open(config: &RemoteLinkConfig) -> Result<Self> {
        config.validate()?;
        let link = Link::open(&config.transport)?;
        info!(
            transport = link.transport_name(),
            open = link.is_open(),
            "remote link ready"
        );
        Ok(Self::new(link, config))
    }
}

impl<T: Transport> RemoteLink<T> {
    pub fn new(transport: T, config: &RemoteLinkConfig) -> Self {
        Self {
            telemetry: TelemetryLink::new(transport, &config.skip),
            commands: CommandChannel::new(config.max_command_len),
        }
    }

    /// Offer a record for downlink. See [`TelemetryLink::send`].
    pub fn send(&mut self, record: &TelemetryRecord) -> bool {
        let sequence = self.commands.link_sequence();
        self.telemetry.send(record, sequence)
    }

    /// Process at most one uplinked command line.
    pub fn poll_command(&mut self, fx: &mut Effectors<'_>) -> Option<CommandOutcome> {
        self.commands.poll(self.telemetry.transport_mut(), fx)
    }

    /// Per-cycle transport housekeeping.
    pub fn service(&mut self) -> usize {
        self.telemetry.service()
    }

    pub fn telemetry(&self) -> &TelemetryLink<T> {
        &self.telemetry
    }

    pub fn telemetry_mut(&mut self) -> &mut TelemetryLink<T> {
        &mut self.telemetry
    }

    pub fn commands(&self) -> &CommandChannel {
        &self.commands
    }
}
