use tracing::{info, warn};

use crate::config::{LinkKind, TransportConfig};
use crate::error::Result;
use crate::serial::{SerialConnector, SerialLink};
use crate::socket::{SocketLink, TcpConnector};
use crate::traits::Transport;

/// The transport selected from configuration at start-up.
#[derive(Debug)]
pub enum Link {
    Serial(SerialLink<SerialConnector>),
    Socket(SocketLink<TcpConnector>),
}

impl Link {
    /// Build the configured link and make a first attempt to open it.
    ///
    /// A failed first open is logged, not returned: the link starts closed
    /// and the next write retries.
    pub fn open(config: &TransportConfig) -> Result<Self> {
        config.validate()?;

        let mut link = match config.kind {
            LinkKind::Uart => {
                info!(device = %config.device, "remote link: direct uart");
                Link::Serial(SerialLink::new(
                    SerialConnector::new(&config.device),
                    config.bytes_per_frame(),
                ))
            }
            LinkKind::UartServer => {
                info!(host = %config.host, port = config.port, "remote link: via network server");
                Link::Socket(SocketLink::new(TcpConnector::new(&config.host, config.port)))
            }
        };

        let opened = match &mut link {
            Link::Serial(serial) => serial.open(),
            Link::Socket(socket) => socket.open(),
        };
        if let Err(err) = opened {
            warn!(kind = %config.kind, %err, "remote link not open yet; will retry on write");
        }

        Ok(link)
    }

    /// Which kind of link this is.
    pub fn kind(&self) -> LinkKind {
        match self {
            Link::Serial(_) => LinkKind::Uart,
            Link::Socket(_) => LinkKind::UartServer,
        }
    }

    /// Transport name for diagnostics.
    pub fn transport_name(&self) -> &'static str {
        match self {
            Link::Serial(_) => "serial",
            Link::Socket(_) => "tcp",
        }
    }
}

impl Transport for Link {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        match self {
            Link::Serial(link) => link.write(bytes),
            Link::Socket(link) => link.write(bytes),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self {
            Link::Serial(link) => link.read(buf),
            Link::Socket(link) => link.read(buf),
        }
    }

    fn poll_flush(&mut self) -> Result<usize> {
        match self {
            Link::Serial(link) => link.poll_flush(),
            Link::Socket(link) => link.poll_flush(),
        }
    }

    fn is_open(&self) -> bool {
        match self {
            Link::Serial(link) => link.is_open(),
            Link::Socket(link) => link.is_open(),
        }
    }
}
