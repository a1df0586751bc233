//! Server configuration from command line flags and environment variables.

use std::{
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::Parser;

/// The REST and GraphQL server for splitcash.
///
/// Every flag can also be set with the environment variable named in its help text.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Enable debug logging and the GraphiQL IDE.
    #[arg(long, env = "DEBUG")]
    pub debug: bool,

    /// File path to the JSON document holding the transactions.
    #[arg(long, env = "DATA_PATH", default_value = "data/transactions.json")]
    pub data_path: PathBuf,

    /// Directory holding index.html, styles.css and app.js.
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Directory to write the log file to.
    #[arg(long, env = "LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,
}

impl Config {
    /// The address to listen on, all interfaces on [Config::port].
    pub fn address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
