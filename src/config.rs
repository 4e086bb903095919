use std::net::{IpAddr, SocketAddr};

use tracing::debug;

use crate::core::DisplayFormat;
use crate::error::Result;

/// Runtime settings resolved from flags and environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub format: DisplayFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            format: DisplayFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn new(host: IpAddr, port: u16, format: DisplayFormat) -> Result<Self> {
        format.validate()?;
        let config = Self { host, port, format };
        debug!(?config, "configuration resolved");
        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
