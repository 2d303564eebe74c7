use clap::Parser;
use std::net::SocketAddr;

use crate::trends::SortMode;

/// Situational betting-trends ranking service
#[derive(Parser, Debug, Clone)]
#[command(name = "situational-trends", version, about)]
pub struct Config {
    /// Hosted data API base URL (PostgREST-style)
    #[arg(long, env = "DATA_API_URL")]
    pub data_api_url: Option<String>,

    /// Data API key, sent as `apikey` and bearer token
    #[arg(long, env = "DATA_API_KEY")]
    pub data_api_key: Option<String>,

    /// Table holding per-team situational trend rows
    #[arg(long, env = "TRENDS_TABLE", default_value = "nba_situational_trends")]
    pub trends_table: String,

    /// Table holding per-game tipoff times and spreads ("" to disable)
    #[arg(long, env = "SCHEDULE_TABLE", default_value = "nba_game_lines")]
    pub schedule_table: String,

    /// Read rows from a local JSON file instead of the data API
    #[arg(long, env = "ROWS_FILE")]
    pub rows_file: Option<String>,

    /// Dashboard API listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,

    /// Sort mode used when a request does not name one
    #[arg(long, env = "DEFAULT_SORT", default_value = "time")]
    pub default_sort: SortMode,

    /// Fetch and rank once, print JSON to stdout and exit
    #[arg(long, default_value = "false")]
    pub print: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (&self.rows_file, &self.data_api_url) {
            (None, None) => {
                anyhow::bail!("Either ROWS_FILE or DATA_API_URL must be set");
            }
            (None, Some(url)) => {
                url::Url::parse(url)
                    .map_err(|e| anyhow::anyhow!("DATA_API_URL is not a valid URL: {}", e))?;
            }
            (Some(_), _) => {}
        }
        if self.trends_table.trim().is_empty() {
            anyhow::bail!("trends_table must not be empty");
        }
        self.dashboard_addr
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("dashboard_addr is invalid: {}", e))?;
        Ok(())
    }

    /// Schedule table, or `None` when disabled.
    pub fn schedule_table(&self) -> Option<&str> {
        Some(self.schedule_table.trim()).filter(|t| !t.is_empty())
    }
}
