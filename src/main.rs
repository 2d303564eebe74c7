use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use situational_trends::config::Config;
use situational_trends::dashboard::{self, AppState, GameSummary};
use situational_trends::source::{load_games, FileSource, RestSource, RowSource};
use situational_trends::trends::rank_scored;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let source: Arc<dyn RowSource> = match (&config.rows_file, &config.data_api_url) {
        (Some(path), _) => {
            info!("Reading trend rows from file {}", path);
            Arc::new(FileSource::new(path))
        }
        (None, Some(url)) => {
            info!("Reading trend rows from {} (table {})", url, config.trends_table);
            Arc::new(RestSource::new(
                url,
                config.data_api_key.clone(),
                &config.trends_table,
                config.schedule_table(),
            )?)
        }
        (None, None) => anyhow::bail!("no row source configured"),
    };

    if config.print {
        let grouped = load_games(source.as_ref()).await?;
        let ranked = rank_scored(&grouped.games, config.default_sort);
        let summaries: Vec<GameSummary> = ranked.iter().map(GameSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    let app = dashboard::router(AppState {
        source,
        default_sort: config.default_sort,
    });
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!("Dashboard API listening on http://{} (default sort: {})", addr, config.default_sort);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
