// Server configuration from command-line flags, environment and `.env`

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "business-server", version, about = "Business directory REST service")]
pub struct Config {
    /// SQLite database file
    #[arg(long, env = "BUSINESS_DB", default_value = "yelp.db")]
    pub database: PathBuf,

    /// Address the HTTP server listens on
    #[arg(long, env = "BUSINESS_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Maximum number of pooled database connections
    #[arg(long, env = "BUSINESS_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,

    /// Seconds to wait for a pooled connection before failing
    #[arg(long, env = "BUSINESS_CONNECT_TIMEOUT", default_value_t = 30)]
    pub connect_timeout_secs: u64,
}

impl Config {
    /// Load `.env` (if present) and then parse the process arguments
    pub fn load() -> Self {
        // A missing .env file is normal
        let _ = dotenv::dotenv();
        Self::parse()
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
