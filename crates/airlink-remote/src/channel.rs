use std::collections::VecDeque;
use std::time::{Duration, Instant};

use airlink_transport::Transport;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::config::DEFAULT_MAX_COMMAND_LEN;
use crate::effectors::Effectors;
use crate::envelope;
use crate::error::{CommandError, EnvelopeError};
use crate::line::LineAssembler;

const READ_CHUNK: usize = 64;

/// What became of one received command line.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// New sequence number, command applied.
    Executed { sequence: i64, command: Command },
    /// New sequence number, but the command text was not understood.
    Rejected { sequence: i64, error: CommandError },
    /// Retransmission of the last accepted sequence number.
    Duplicate { sequence: i64 },
    /// The line failed validation and was dropped.
    Discarded(EnvelopeError),
}

impl CommandOutcome {
    /// Whether the line passed validation. Duplicates count as received so
    /// the ground station's retransmissions are still acknowledged.
    pub fn is_received(&self) -> bool {
        !matches!(self, CommandOutcome::Discarded(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelStats {
    pub executed: u64,
    pub rejected: u64,
    pub duplicates: u64,
    pub discarded: u64,
    pub overflows: u64,
}

/// Uplink command processing: line assembly, validation, sequence
/// de-duplication and dispatch.
#[derive(Debug)]
pub struct CommandChannel {
    lines: LineAssembler,
    pending: VecDeque<Vec<u8>>,
    last_sequence: i64,
    link_sequence: i64,
    last_message_at: Option<Instant>,
    stats: ChannelStats,
}

impl Default for CommandChannel {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COMMAND_LEN)
    }
}

impl CommandChannel {
    pub fn new(max_line_len: usize) -> Self {
        Self {
            lines: LineAssembler::new(max_line_len),
            pending: VecDeque::new(),
            last_sequence: -1,
            link_sequence: 0,
            last_message_at: None,
            stats: ChannelStats::default(),
        }
    }

    /// Queue received bytes. Complete lines wait for [`poll`](Self::poll)
    /// or [`next_line`](Self::next_line).
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if let Some(line) = self.lines.push(byte) {
                self.pending.push_back(line);
            }
        }
    }

    /// Take the oldest complete line.
    pub fn next_line(&mut self) -> Option<Vec<u8>> {
        self.pending.pop_front()
    }

    /// Read what the transport has and process at most one complete line.
    ///
    /// Returns `None` when no complete line is available yet. Reading stops
    /// as soon as a line completes; later bytes stay in the transport.
    pub fn poll<T: Transport>(
        &mut self,
        transport: &mut T,
        fx: &mut Effectors<'_>,
    ) -> Option<CommandOutcome> {
        let mut buf = [0u8; READ_CHUNK];
        while self.pending.is_empty() {
            match transport.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => self.feed(&buf[..n]),
                Err(err) => {
                    debug!(%err, "command read failed");
                    break;
                }
            }
        }

        let line = self.next_line()?;
        Some(self.process_line(&line, fx))
    }

    /// Validate, de-duplicate and execute one line (without its newline).
    pub fn process_line(&mut self, line: &[u8], fx: &mut Effectors<'_>) -> CommandOutcome {
        let envelope = match envelope::open(line) {
            Ok(envelope) => envelope,
            Err(err) => {
                debug!(%err, len = line.len(), "command line discarded");
                self.stats.discarded += 1;
                return CommandOutcome::Discarded(err);
            }
        };

        let sequence = envelope.sequence;
        if sequence == self.last_sequence {
            debug!(sequence, "duplicate command ignored");
            self.stats.duplicates += 1;
            return CommandOutcome::Duplicate { sequence };
        }

        // The sequence is consumed even if the command itself is unusable.
        self.last_sequence = sequence;
        self.link_sequence = sequence;
        self.last_message_at = Some(Instant::now());

        match Command::parse(envelope.command) {
            Ok(command) => {
                info!(sequence, command = command.keyword(), "remote command");
                command.execute(fx);
                self.stats.executed += 1;
                CommandOutcome::Executed { sequence, command }
            }
            Err(error) => {
                warn!(sequence, %error, text = envelope.command, "remote command not executed");
                self.stats.rejected += 1;
                CommandOutcome::Rejected { sequence, error }
            }
        }
    }

    /// Sequence number of the last accepted command, -1 before the first.
    pub fn last_sequence(&self) -> i64 {
        self.last_sequence
    }

    /// Sequence number echoed on the downlink: the last accepted one, or 0
    /// before any command arrived.
    pub fn link_sequence(&self) -> i64 {
        self.link_sequence
    }

    /// Time since the last accepted command.
    pub fn last_message_age(&self) -> Option<Duration> {
        self.last_message_at.map(|at| at.elapsed())
    }

    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            overflows: self.lines.overflows(),
            ..self.stats
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use airlink_transport::TransportError;

    use super::*;
    use crate::effectors::{paths, PropertyStore};
    use crate::envelope::sign;

    #[derive(Default)]
    struct Props(HashMap<String, String>);

    impl PropertyStore for Props {
        fn get_f64(&self, path: &str) -> Option<f64> {
            self.0.get(path).and_then(|v| v.parse().ok())
        }

        fn set_f64(&mut self, path: &str, value: f64) {
            self.0.insert(path.to_string(), value.to_string());
        }

        fn set_bool(&mut self, path: &str, value: bool) {
            self.0.insert(path.to_string(), value.to_string());
        }

        fn set_string(&mut self, path: &str, value: &str) {
            self.0.insert(path.to_string(), value.to_string());
        }
    }

    /// Hands out scripted reads, one chunk per call.
    struct Uplink {
        chunks: VecDeque<Vec<u8>>,
        reads: usize,
    }

    impl Uplink {
        fn new(chunks: &[&[u8]]) -> Self {
            Self {
                chunks: chunks.iter().map(|c| c.to_vec()).collect(),
                reads: 0,
            }
        }
    }

    impl Transport for Uplink {
        fn write(&mut self, bytes: &[u8]) -> airlink_transport::Result<usize> {
            Ok(bytes.len())
        }

        fn read(&mut self, buf: &mut [u8]) -> airlink_transport::Result<usize> {
            self.reads += 1;
            let Some(chunk) = self.chunks.pop_front() else {
                return Ok(0);
            };
            let n = chunk.len().min(buf.len());
            buf[..n].copy_from_slice(&chunk[..n]);
            if n < chunk.len() {
                self.chunks.push_front(chunk[n..].to_vec());
            }
            Ok(n)
        }

        fn is_open(&self) -> bool {
            true
        }
    }

    fn line(body: &str) -> Vec<u8> {
        sign(body).into_bytes()
    }

    #[test]
    fn executes_then_ignores_duplicate() {
        let mut props = Props::default();
        let mut fx = Effectors::new(&mut props);
        let mut channel = CommandChannel::default();
        assert_eq!(channel.last_sequence(), -1);
        assert_eq!(channel.link_sequence(), 0);
        assert!(channel.last_message_age().is_none());

        let first = channel.process_line(&line("7,hb"), &mut fx);
        assert_eq!(
            first,
            CommandOutcome::Executed {
                sequence: 7,
                command: Command::Heartbeat
            }
        );

        let again = channel.process_line(&line("7,hb"), &mut fx);
        assert_eq!(again, CommandOutcome::Duplicate { sequence: 7 });
        assert!(again.is_received());

        let next = channel.process_line(&line("8,hb"), &mut fx);
        assert!(matches!(next, CommandOutcome::Executed { sequence: 8, .. }));

        let stats = channel.stats();
        assert_eq!((stats.executed, stats.duplicates), (2, 1));
        assert_eq!(channel.last_sequence(), 8);
        assert_eq!(channel.link_sequence(), 8);
        assert!(channel.last_message_age().is_some());
    }

    #[test]
    fn duplicate_is_only_the_immediately_previous_sequence() {
        let mut props = Props::default();
        let mut fx = Effectors::new(&mut props);
        let mut channel = CommandChannel::default();

        for seq in [1, 2, 1] {
            let outcome = channel.process_line(&line(&format!("{seq},hb")), &mut fx);
            assert!(matches!(outcome, CommandOutcome::Executed { .. }));
        }
    }

    #[test]
    fn tampered_line_is_discarded_without_side_effects() {
        let mut props = Props::default();
        let mut fx = Effectors::new(&mut props);
        let mut channel = CommandChannel::default();

        let mut tampered = line("3,set,/a/b,on");
        let last = tampered.len() - 1;
        tampered[last] = if tampered[last] == b'0' { b'1' } else { b'0' };

        let outcome = channel.process_line(&tampered, &mut fx);
        assert!(matches!(
            outcome,
            CommandOutcome::Discarded(EnvelopeError::ChecksumMismatch { .. })
        ));
        assert!(!outcome.is_received());
        assert_eq!(channel.last_sequence(), -1);
        assert_eq!(channel.link_sequence(), 0);
        assert!(props.0.is_empty());
    }

    #[test]
    fn rejected_command_still_consumes_sequence() {
        let mut props = Props::default();
        let mut fx = Effectors::new(&mut props);
        let mut channel = CommandChannel::default();

        let outcome = channel.process_line(&line("4,warp,9"), &mut fx);
        assert_eq!(
            outcome,
            CommandOutcome::Rejected {
                sequence: 4,
                error: CommandError::UnknownKeyword("warp".to_string())
            }
        );
        assert!(outcome.is_received());
        assert_eq!(channel.last_sequence(), 4);
        assert_eq!(channel.link_sequence(), 4);

        // A retransmission with the same sequence is now a duplicate.
        let retry = channel.process_line(&line("4,hb"), &mut fx);
        assert_eq!(retry, CommandOutcome::Duplicate { sequence: 4 });
    }

    #[test]
    fn poll_assembles_lines_across_reads() {
        let mut props = Props::default();
        let mut fx = Effectors::new(&mut props);
        let mut channel = CommandChannel::default();

        let text = format!("{}\n{}\n", sign("1,ap,agl-ft,350"), sign("2,task,land"));
        let (a, b) = text.as_bytes().split_at(5);
        let mut uplink = Uplink::new(&[a, b]);

        let first = channel.poll(&mut uplink, &mut fx).unwrap();
        assert!(matches!(first, CommandOutcome::Executed { sequence: 1, .. }));
        let second = channel.poll(&mut uplink, &mut fx).unwrap();
        assert!(matches!(second, CommandOutcome::Executed { sequence: 2, .. }));
        assert!(channel.poll(&mut uplink, &mut fx).is_none());

        assert_eq!(props.0[paths::TARGET_AGL_FT], "350");
        assert_eq!(props.0[paths::TASK_REQUEST], "task,land");
    }

    #[test]
    fn poll_without_complete_line_returns_none() {
        let mut props = Props::default();
        let mut fx = Effectors::new(&mut props);
        let mut channel = CommandChannel::default();
        let mut uplink = Uplink::new(&[&b"5,h"[..]]);

        assert!(channel.poll(&mut uplink, &mut fx).is_none());
        assert_eq!(uplink.reads, 2);
    }

    #[test]
    fn poll_survives_read_errors() {
        struct Broken;

        impl Transport for Broken {
            fn write(&mut self, _: &[u8]) -> airlink_transport::Result<usize> {
                Err(TransportError::Closed)
            }

            fn read(&mut self, _: &mut [u8]) -> airlink_transport::Result<usize> {
                Err(TransportError::Closed)
            }

            fn is_open(&self) -> bool {
                false
            }
        }

        let mut props = Props::default();
        let mut fx = Effectors::new(&mut props);
        let mut channel = CommandChannel::default();
        assert!(channel.poll(&mut Broken, &mut fx).is_none());
    }

    #[test]
    fn overlong_line_is_dropped() {
        let mut props = Props::default();
        let mut fx = Effectors::new(&mut props);
        let mut channel = CommandChannel::new(16);

        channel.feed(format!("{}\n", sign("1,set,/a/very/long/path,1")).as_bytes());
        channel.feed(format!("{}\n", sign("2,hb")).as_bytes());

        // Only the tail of the oversized line and the heartbeat come through.
        let mut outcomes = Vec::new();
        while let Some(line) = channel.next_line() {
            outcomes.push(channel.process_line(&line, &mut fx));
        }
        assert!(matches!(outcomes.last(), Some(CommandOutcome::Executed { sequence: 2, .. })));
        assert_eq!(channel.stats().overflows, 1);
        assert!(props.0.is_empty());
    }
}
