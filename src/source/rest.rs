use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::normalize::{parse_game_lines, parse_trend_rows};
use super::RowSource;
use crate::trends::{GameLine, TrendRow};

/// Row source backed by a hosted PostgREST-style data store
/// (`GET {base}/rest/v1/{table}?select=*`).
#[derive(Clone)]
pub struct RestSource {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
    trends_table: String,
    lines_table: Option<String>,
}

impl RestSource {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        trends_table: &str,
        lines_table: Option<&str>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        let base_url = Url::parse(base_url).context("Invalid data API URL")?;
        Ok(RestSource {
            http,
            base_url,
            api_key,
            trends_table: trends_table.to_string(),
            lines_table: lines_table.map(str::to_string),
        })
    }

    /// Query URL for a whole table, ordered by game date.
    pub fn table_url(&self, table: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("rest/v1/{}", table))
            .with_context(|| format!("Invalid table name {:?}", table))?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "game_date.asc");
        Ok(url)
    }

    async fn fetch_table(&self, table: &str) -> Result<serde_json::Value> {
        let url = self.table_url(table)?;
        debug!("Fetching {}", url);

        let mut req = self.http.get(url.clone());
        if let Some(key) = &self.api_key {
            req = req.header("apikey", key).bearer_auth(key);
        }
        let resp = req
            .send()
            .await
            .with_context(|| format!("Data API request for {} failed", table))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Data API error {} for {}: {}", status, table, body);
        }

        resp.json()
            .await
            .with_context(|| format!("Failed to parse {} response", table))
    }
}

#[async_trait]
impl RowSource for RestSource {
    fn name(&self) -> &str {
        "rest"
    }

    async fn fetch_trend_rows(&self) -> Result<Vec<TrendRow>> {
        let raw = self.fetch_table(&self.trends_table).await?;
        let rows = parse_trend_rows(&raw)?;
        info!("Fetched {} trend rows from {}", rows.len(), self.trends_table);
        Ok(rows)
    }

    async fn fetch_game_lines(&self) -> Result<Vec<GameLine>> {
        let Some(table) = &self.lines_table else {
            return Ok(Vec::new());
        };
        let raw = self.fetch_table(table).await?;
        parse_game_lines(&raw)
    }
}
