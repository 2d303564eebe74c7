pub mod file;
pub mod normalize;
pub mod rest;

pub use file::FileSource;
pub use rest::RestSource;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::trends::{attach_lines, group_rows_with_report, GameLine, Grouped, TrendRow};

/// Trait that every trend-row source must implement.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Fetch the flat per-team trend rows, already normalized.
    async fn fetch_trend_rows(&self) -> Result<Vec<TrendRow>>;

    /// Fetch the secondary per-game lookup (tipoff, spreads).
    async fn fetch_game_lines(&self) -> Result<Vec<GameLine>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Fetch rows and lines concurrently, then group and merge.
///
/// A failed row fetch is an error.  A failed line fetch only costs the
/// tipoff/edge data: games are still grouped and returned.
pub async fn load_games(source: &dyn RowSource) -> Result<Grouped> {
    let (rows, lines) =
        futures_util::future::join(source.fetch_trend_rows(), source.fetch_game_lines()).await;
    let rows = rows?;
    let lines = lines.unwrap_or_else(|e| {
        warn!("Game line lookup from {} failed: {}", source.name(), e);
        Vec::new()
    });

    let grouped = group_rows_with_report(&rows);
    info!(
        "Loaded {} trend rows from {} into {} complete games ({} lines)",
        rows.len(),
        source.name(),
        grouped.games.len(),
        lines.len()
    );
    Ok(Grouped {
        games: attach_lines(grouped.games, &lines),
        report: grouped.report,
    })
}
