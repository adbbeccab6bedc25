use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::Parser;
use portfolio::comment::SortOption;
use portfolio::config::PortfolioConfig;
use portfolio::ConfigError;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal front-end for the portfolio site", long_about = None)]
pub struct Cli {
    /// Base URL of the portfolio backend, e.g. <http://127.0.0.1:8080>
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// TOML config file; flags given on the command line win over its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show at most this many comments
    #[arg(short, long)]
    pub max_comments: Option<NonZeroU32>,

    /// Comment order {newest, oldest, author-asc, author-desc}
    #[arg(short, long)]
    pub sort: Option<SortOption>,

    /// Request timeout in seconds, 0 disables it
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Logging level for all subsystems {off, error, warn, info, debug, trace}
    ///  -- You may also specify `<subsystem>=<level>,<subsystem2>=<level>,...` to set the log level for individual subsystems
    #[arg(long = "loglevel")]
    pub log_level: Option<String>,

    /// File receiving log output (the terminal itself is owned by the UI)
    #[arg(long)]
    pub log_file: Option<String>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolve(self) -> Result<PortfolioConfig, ConfigError> {
        let cfg = match &self.config {
            Some(path) => PortfolioConfig::load(path)?,
            None => PortfolioConfig::default(),
        };
        let cfg = self.merge_into_config(cfg);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn merge_into_config(self, mut cfg: PortfolioConfig) -> PortfolioConfig {
        if let Some(v) = self.base_url {
            cfg.base_url = v;
        }
        if let Some(v) = self.max_comments {
            cfg.max_comments = Some(v);
        }
        if let Some(v) = self.sort {
            cfg.sort_option = Some(v);
        }
        if let Some(v) = self.timeout_secs {
            cfg.timeout_secs = v;
        }
        if let Some(v) = self.log_level {
            cfg.log_level = v;
        }
        if let Some(v) = self.log_file {
            cfg.log_file = Some(v);
        }
        cfg
    }
}
