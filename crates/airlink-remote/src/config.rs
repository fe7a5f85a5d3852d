use std::path::Path;

use airlink_record::RecordKind;
use airlink_transport::TransportConfig;
use serde::{Deserialize, Serialize};

use crate::error::{RemoteError, Result};

/// Default command line buffer size. A line must be shorter than this.
pub const DEFAULT_MAX_COMMAND_LEN: usize = 256;

/// Per-record decimation: how many send opportunities to skip between
/// transmissions. Negative values behave as 0 (send every time).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipConfig {
    pub gps: i32,
    pub imu: i32,
    pub airdata: i32,
    pub filter: i32,
    pub actuator: i32,
    pub pilot: i32,
    pub ap: i32,
    pub health: i32,
    pub payload: i32,
}

impl SkipConfig {
    /// The same skip count for every record kind.
    pub fn uniform(skip: i32) -> Self {
        let mut config = Self::default();
        for kind in RecordKind::ALL {
            config.set(kind, skip);
        }
        config
    }

    pub fn get(&self, kind: RecordKind) -> i32 {
        match kind {
            RecordKind::Gps => self.gps,
            RecordKind::Imu => self.imu,
            RecordKind::AirData => self.airdata,
            RecordKind::Filter => self.filter,
            RecordKind::Actuator => self.actuator,
            RecordKind::Pilot => self.pilot,
            RecordKind::Ap => self.ap,
            RecordKind::Health => self.health,
            RecordKind::Payload => self.payload,
        }
    }

    pub fn set(&mut self, kind: RecordKind, skip: i32) {
        let slot = match kind {
            RecordKind::Gps => &mut self.gps,
            RecordKind::Imu => &mut self.imu,
            RecordKind::AirData => &mut self.airdata,
            RecordKind::Filter => &mut self.filter,
            RecordKind::Actuator => &mut self.actuator,
            RecordKind::Pilot => &mut self.pilot,
            RecordKind::Ap => &mut self.ap,
            RecordKind::Health => &mut self.health,
            RecordKind::Payload => &mut self.payload,
        };
        *slot = skip;
    }
}

/// Remote link configuration.
///
/// ```json
/// {
///   "transport": { "type": "uart", "device": "/dev/ttyO1" },
///   "skip": { "gps": 4, "imu": 9 },
///   "max_command_len": 256
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteLinkConfig {
    pub transport: TransportConfig,
    pub skip: SkipConfig,
    pub max_command_len: usize,
}

impl Default for RemoteLinkConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            skip: SkipConfig::default(),
            max_command_len: DEFAULT_MAX_COMMAND_LEN,
        }
    }
}

impl RemoteLinkConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RemoteError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.transport.validate()?;
        // Room for at least "0,x*HH".
        if self.max_command_len < 6 {
            return Err(RemoteError::Config(format!(
                "max_command_len must be at least 6, got {}",
                self.max_command_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use airlink_transport::LinkKind;

    use super::*;

    #[test]
    fn defaults() {
        let config = RemoteLinkConfig::default();
        assert_eq!(config.transport.kind, LinkKind::Uart);
        assert_eq!(config.max_command_len, 256);
        assert_eq!(config.skip, SkipConfig::default());
        config.validate().unwrap();
    }

    #[test]
    fn parses_full_document() {
        let config = RemoteLinkConfig::from_json(
            r#"{
                "transport": { "type": "uart-server", "host": "10.0.0.2", "port": 6000 },
                "skip": { "gps": 4, "imu": 9, "health": -3 },
                "max_command_len": 128
            }"#,
        )
        .unwrap();

        assert_eq!(config.transport.kind, LinkKind::UartServer);
        assert_eq!(config.transport.host, "10.0.0.2");
        assert_eq!(config.transport.port, 6000);
        assert_eq!(config.skip.get(RecordKind::Gps), 4);
        assert_eq!(config.skip.get(RecordKind::Imu), 9);
        assert_eq!(config.skip.get(RecordKind::Health), -3);
        assert_eq!(config.skip.get(RecordKind::Payload), 0);
        assert_eq!(config.max_command_len, 128);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(
            RemoteLinkConfig::from_json("{}").unwrap(),
            RemoteLinkConfig::default()
        );
    }

    #[test]
    fn unknown_link_type_rejected() {
        let err = RemoteLinkConfig::from_json(r#"{ "transport": { "type": "carrier-pigeon" } }"#)
            .unwrap_err();
        assert!(matches!(err, RemoteError::Json(_)));
    }

    #[test]
    fn tiny_command_buffer_rejected() {
        let err = RemoteLinkConfig::from_json(r#"{ "max_command_len": 3 }"#).unwrap_err();
        assert!(matches!(err, RemoteError::Config(_)));
    }

    #[test]
    fn uniform_skip() {
        let skip = SkipConfig::uniform(2);
        assert!(RecordKind::ALL.iter().all(|kind| skip.get(*kind) == 2));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RemoteLinkConfig::load("/nonexistent/airlink.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/airlink.json"));
    }
}
