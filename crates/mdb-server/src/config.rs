use std::net::{IpAddr, SocketAddr};

use crate::error::Result;
pub use clap::Parser;
use mdb_types::config::BackendConfig;
use url::Url;

#[derive(Debug, Clone, clap::Parser)]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "MDB_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "MDB_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "MDB_BASE_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of server, as visible to users"
    )]
    pub base_url: Url,

    #[arg(
        long,
        env = "MDB_CORS",
        help = "Allow cross origin requests from any site"
    )]
    pub cors: bool,

    #[command(flatten)]
    pub backend: BackendConfig,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.listen_address.parse()?;
        Ok(SocketAddr::from((ip, self.port)))
    }
}
