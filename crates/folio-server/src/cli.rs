use std::path::PathBuf;

use clap::Parser;

use folio_config::FolioConfig;

/// Command-line flags for the `folio-server` binary.
///
/// Flags override the loaded configuration.
#[derive(Debug, Parser)]
#[command(name = "folio-server", version, about = "Folio - profile, timeline and portfolio API")]
pub struct Cli {
    /// Extra TOML config file, layered above folio.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Database path, or ":memory:"
    #[arg(short, long)]
    pub database: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn apply(&self, config: &mut FolioConfig) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(database) = &self.database {
            config.database.path.clone_from(database);
        }
    }

    /// Log level when `FOLIO_LOG` is unset.
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            configured
        }
    }
}
