//! Configuration for Homestead
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;

/// Homestead - property and checklist backend for Loved Homes
#[derive(Parser, Debug, Clone)]
#[command(name = "homestead")]
#[command(about = "Property and checklist backend for Loved Homes")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8000")]
    pub listen: SocketAddr,

    /// MongoDB connection URI
    #[arg(long, env = "DATABASE_URL", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "DATABASE_NAME", default_value = "lovedhomes")]
    pub mongodb_db: String,

    /// Allow startup without a database connection (storage routes answer 503)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.mongodb_db.trim().is_empty() {
            return Err("DATABASE_NAME must not be empty".to_string());
        }
        if self.mongodb_uri.trim().is_empty() {
            return Err("DATABASE_URL must not be empty".to_string());
        }
        Ok(())
    }
}
