use airlink_frame::FrameWriter;
use airlink_record::{RecordKind, TelemetryRecord};
use airlink_transport::Transport;
use bytes::BytesMut;
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::SkipConfig;
use crate::throttle::Throttle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    /// Frames handed to the transport.
    pub sent: u64,
    /// Send opportunities skipped by the throttle.
    pub throttled: u64,
    /// Transport or framing failures.
    pub errors: u64,
    /// Bytes the transport accepted.
    pub bytes: u64,
}

/// Downlink half of the remote link: throttle, encode, frame, write.
///
/// Transport faults never reach the caller. They are logged and counted, and
/// the transport retries on its own schedule.
pub struct TelemetryLink<T, R = StdRng> {
    writer: FrameWriter<T>,
    throttle: Throttle<R>,
    payload: BytesMut,
    stats: LinkStats,
}

impl<T: Transport> TelemetryLink<T> {
    pub fn new(transport: T, skip: &SkipConfig) -> Self {
        Self::with_throttle(transport, Throttle::new(skip))
    }
}

impl<T: Transport, R: Rng> TelemetryLink<T, R> {
    pub fn with_throttle(transport: T, throttle: Throttle<R>) -> Self {
        Self {
            writer: FrameWriter::new(transport),
            throttle,
            payload: BytesMut::with_capacity(64),
            stats: LinkStats::default(),
        }
    }

    /// Offer `record` for transmission.
    ///
    /// Returns `false` when the throttle skipped it and `true` otherwise,
    /// including when the write itself failed. Navigation and autopilot
    /// records are stamped with `link_sequence` first.
    pub fn send(&mut self, record: &TelemetryRecord, link_sequence: i64) -> bool {
        let kind = record.kind();
        if !self.throttle.should_send(kind) {
            self.stats.throttled += 1;
            return false;
        }

        let mut record = *record;
        record.stamp_sequence(link_sequence);

        self.payload.clear();
        record.encode(&mut self.payload);
        match self.writer.send(record.packet_id(), &self.payload) {
            Ok(written) => {
                self.stats.sent += 1;
                self.stats.bytes += written as u64;
                if written == 0 {
                    debug!(%kind, "transport took nothing this cycle");
                }
            }
            Err(err) => {
                self.stats.errors += 1;
                warn!(%kind, %err, "telemetry send failed");
            }
        }
        true
    }

    /// Push buffered output toward the device. Call once per cycle.
    pub fn service(&mut self) -> usize {
        match self.writer.get_mut().poll_flush() {
            Ok(written) => written,
            Err(err) => {
                self.stats.errors += 1;
                warn!(%err, "telemetry flush failed");
                0
            }
        }
    }

    pub fn set_skip_count(&mut self, kind: RecordKind, skip_count: i32) {
        self.throttle.set_skip_count(kind, skip_count);
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    pub fn transport(&self) -> &T {
        self.writer.get_ref()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.writer.get_mut()
    }
}
