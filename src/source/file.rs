use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

use super::normalize::{parse_game_lines, parse_trend_rows};
use super::RowSource;
use crate::trends::{GameLine, TrendRow};

/// Row source reading a local JSON export.
///
/// Accepts either a bare array of trend rows, or an object
/// `{ "rows": [...], "lines": [...] }` where `lines` is optional.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    async fn read(&self) -> Result<Value> {
        debug!("Reading trend rows from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", self.path.display()))
    }
}

#[async_trait]
impl RowSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_trend_rows(&self) -> Result<Vec<TrendRow>> {
        let raw = self.read().await?;
        match raw.get("rows") {
            Some(rows) => parse_trend_rows(rows),
            None => parse_trend_rows(&raw),
        }
    }

    async fn fetch_game_lines(&self) -> Result<Vec<GameLine>> {
        let raw = self.read().await?;
        match raw.get("lines") {
            Some(lines) => parse_game_lines(lines),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("situational-trends-{}-{}.json", std::process::id(), name));
        std::fs::write(&path, contents).expect("temp file should be writable");
        path
    }

    #[tokio::test]
    async fn reads_rows_and_lines_object() {
        let path = write_temp(
            "object",
            r#"{
                "rows": [
                    {"game_id": "1", "game_date": "2025-01-01", "team_side": "away"},
                    {"game_id": "1", "game_date": "2025-01-01", "team_side": "home"}
                ],
                "lines": [{"game_id": "1", "tipoff": "2025-01-01T23:00:00Z"}]
            }"#,
        );
        let source = FileSource::new(&path);
        assert_eq!(source.fetch_trend_rows().await.unwrap().len(), 2);
        assert_eq!(source.fetch_game_lines().await.unwrap().len(), 1);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn reads_bare_row_array_without_lines() {
        let path = write_temp(
            "array",
            r#"[{"game_id": "1", "game_date": "2025-01-01", "team_side": "away"}]"#,
        );
        let source = FileSource::new(&path);
        assert_eq!(source.fetch_trend_rows().await.unwrap().len(), 1);
        assert!(source.fetch_game_lines().await.unwrap().is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let source = FileSource::new("/nonexistent/situational-trends.json");
        assert!(source.fetch_trend_rows().await.is_err());
    }
}
