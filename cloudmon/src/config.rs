//! Command line: target service, poll cadences and query parameters.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::client::SortKey;
use crate::dashboard::PollSettings;
use crate::ui::theme::Theme;

pub const DEFAULT_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "cloudmon",
    version,
    about = "Terminal dashboard for a remote HTTP system metrics service"
)]
pub struct Args {
    /// Base URL of the metrics service (default http://127.0.0.1:5000)
    pub url: Option<String>,

    /// Named connection profile; created on first use together with a URL
    #[arg(short = 'P', long)]
    pub profile: Option<String>,

    /// Overwrite an existing profile that differs from the given URL/CA
    #[arg(long)]
    pub save: bool,

    /// PEM file with an extra trusted root certificate for https services
    #[arg(short = 't', long = "tls-ca", value_name = "CERT_PEM")]
    pub tls_ca: Option<String>,

    /// Latest-snapshot poll interval in milliseconds
    #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(1..))]
    pub snapshot_ms: u64,

    /// History poll interval in milliseconds
    #[arg(long, default_value_t = 5000, value_parser = clap::value_parser!(u64).range(1..))]
    pub history_ms: u64,

    /// Process list poll interval in milliseconds
    #[arg(long, default_value_t = 3000, value_parser = clap::value_parser!(u64).range(1..))]
    pub processes_ms: u64,

    /// Number of history points requested
    #[arg(long, default_value_t = 60)]
    pub history_points: usize,

    /// Number of processes requested
    #[arg(long, default_value_t = 6)]
    pub top: usize,

    /// Process ranking requested from the service
    #[arg(long, value_enum, default_value_t = SortKey::Cpu)]
    pub sort: SortKey,

    /// Initial theme
    #[arg(long, value_enum, default_value_t = Theme::Light)]
    pub theme: Theme,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 10_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,

    /// Log file (default: cloudmon.log in the config directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Resolve the target, print the endpoints and exit
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            snapshot_every: Duration::from_millis(self.snapshot_ms),
            history_every: Duration::from_millis(self.history_ms),
            processes_every: Duration::from_millis(self.processes_ms),
            history_points: self.history_points,
            top_n: self.top,
            sort: self.sort,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
