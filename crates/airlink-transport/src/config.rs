use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransportError};

/// Serial links always run 8N1 at this rate.
pub const SERIAL_BAUD: u32 = 115_200;

/// Default number of buffered bytes pushed to the serial port per flush.
pub const DEFAULT_BYTES_PER_FRAME: usize = 12;

/// Which byte channel carries the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    /// Direct serial radio.
    #[serde(rename = "uart")]
    Uart,
    /// TCP connection to a relay that owns the radio.
    #[serde(rename = "uart-server")]
    UartServer,
}

impl LinkKind {
    /// Configuration spelling of this link kind.
    pub fn as_str(self) -> &'static str {
        match self {
            LinkKind::Uart => "uart",
            LinkKind::UartServer => "uart-server",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkKind {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "uart" => Ok(LinkKind::Uart),
            "uart-server" => Ok(LinkKind::UartServer),
            other => Err(TransportError::InvalidConfig(format!(
                "unknown link type {other:?} (expected \"uart\" or \"uart-server\")"
            ))),
        }
    }
}

/// Transport selection and endpoint parameters.
///
/// Unknown keys are rejected. The serial rate is fixed, so that includes
/// `baud`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportConfig {
    /// Link kind, chosen once at start-up.
    #[serde(rename = "type")]
    pub kind: LinkKind,
    /// Serial device path (uart only).
    pub device: String,
    /// Relay host (uart-server only).
    pub host: String,
    /// Relay TCP port (uart-server only).
    pub port: u16,
    /// Bytes drained from the serial FIFO per flush. Zero means the default.
    pub write_bytes_per_frame: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            kind: LinkKind::Uart,
            device: "/dev/ttyS0".to_string(),
            host: "localhost".to_string(),
            port: 5051,
            write_bytes_per_frame: DEFAULT_BYTES_PER_FRAME,
        }
    }
}

impl TransportConfig {
    /// Serial link on `device`.
    pub fn uart(device: impl Into<String>) -> Self {
        Self {
            kind: LinkKind::Uart,
            device: device.into(),
            ..Self::default()
        }
    }

    /// Relay link to `host:port`.
    pub fn uart_server(host: impl Into<String>, port: u16) -> Self {
        Self {
            kind: LinkKind::UartServer,
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Effective per-flush chunk size (zero is normalised to the default).
    pub fn bytes_per_frame(&self) -> usize {
        if self.write_bytes_per_frame == 0 {
            DEFAULT_BYTES_PER_FRAME
        } else {
            self.write_bytes_per_frame
        }
    }

    /// Reject configurations that cannot name an endpoint.
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            LinkKind::Uart => {
                if self.device.is_empty() {
                    return Err(TransportError::InvalidConfig(
                        "uart link requires a device path".to_string(),
                    ));
                }
            }
            LinkKind::UartServer => {
                if self.host.is_empty() || self.port == 0 {
                    return Err(TransportError::InvalidConfig(format!(
                        "uart-server link requires host and port (got {}:{})",
                        self.host, self.port
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_kind_parses_config_spelling() {
        assert_eq!("uart".parse::<LinkKind>().unwrap(), LinkKind::Uart);
        assert_eq!(
            "uart-server".parse::<LinkKind>().unwrap(),
            LinkKind::UartServer
        );
        assert!(matches!(
            "radio".parse::<LinkKind>(),
            Err(TransportError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_bytes_per_frame_uses_default() {
        let cfg = TransportConfig {
            write_bytes_per_frame: 0,
            ..TransportConfig::default()
        };
        assert_eq!(cfg.bytes_per_frame(), DEFAULT_BYTES_PER_FRAME);

        let cfg = TransportConfig {
            write_bytes_per_frame: 32,
            ..TransportConfig::default()
        };
        assert_eq!(cfg.bytes_per_frame(), 32);
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let cfg: TransportConfig =
            serde_json::from_str(r#"{"type":"uart-server","host":"relay","port":6000}"#).unwrap();
        assert_eq!(cfg.kind, LinkKind::UartServer);
        assert_eq!(cfg.host, "relay");
        assert_eq!(cfg.port, 6000);
        assert_eq!(cfg.bytes_per_frame(), DEFAULT_BYTES_PER_FRAME);
    }

    #[test]
    fn unknown_link_type_rejected_by_serde() {
        let result = serde_json::from_str::<TransportConfig>(r#"{"type":"carrier-pigeon"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn baud_is_not_configurable() {
        let result = serde_json::from_str::<TransportConfig>(
            r#"{"type":"uart","device":"/dev/ttyO1","baud":9600}"#,
        );
        assert!(result.is_err());
        assert_eq!(SERIAL_BAUD, 115_200);
    }

    #[test]
    fn validate_requires_endpoint() {
        assert!(TransportConfig::uart("/dev/ttyO1").validate().is_ok());
        assert!(TransportConfig::uart("").validate().is_err());
        assert!(TransportConfig::uart_server("relay", 5051).validate().is_ok());
        assert!(TransportConfig::uart_server("relay", 0).validate().is_err());
    }
}
