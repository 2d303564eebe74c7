//! Upstream column normalization.
//!
//! Different tables and views name the same columns differently and send
//! numbers as strings.  Everything is folded into the strict `TrendRow` /
//! `GameLine` schema here so the engine only ever sees one shape.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use crate::trends::{Category, CategoryTrend, GameLine, TrendRow};

type Object = Map<String, Value>;

/// First present, non-null value among `keys`.
fn field<'a, K: AsRef<str>>(obj: &'a Object, keys: &[K]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(k.as_ref()))
        .find(|v| !v.is_null())
}

fn str_field<K: AsRef<str>>(obj: &Object, keys: &[K]) -> Option<String> {
    match field(obj, keys)? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers, or numeric strings such as `"62.5"` / `"62.5%"`.
fn f64_field<K: AsRef<str>>(obj: &Object, keys: &[K]) -> Option<f64> {
    let value = match field(obj, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

/// Accepts `YYYY-MM-DD` or any ISO timestamp starting with one.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn category_trend(obj: &Object, prefix: &str) -> CategoryTrend {
    let keys = |suffixes: &[&str]| -> Vec<String> {
        suffixes.iter().map(|s| format!("{prefix}_{s}")).collect()
    };
    CategoryTrend {
        situation: str_field(obj, keys(&["situation", "label"]).as_slice()),
        ats_record: str_field(obj, keys(&["ats_record"]).as_slice()),
        ats_cover_pct: f64_field(obj, keys(&["ats_cover_pct", "ats_pct"]).as_slice()),
        ou_record: str_field(obj, keys(&["ou_record"]).as_slice()),
        over_pct: f64_field(obj, keys(&["over_pct", "ou_over_pct"]).as_slice()),
        under_pct: f64_field(obj, keys(&["under_pct", "ou_under_pct"]).as_slice()),
    }
}

fn trend_row(obj: &Object) -> Option<TrendRow> {
    let Some(game_id) = str_field(obj, &["game_id", "gameId"]) else {
        warn!("Skipping trend row without a game id");
        return None;
    };
    let Some(game_date) = str_field(obj, &["game_date", "gameDate", "date"])
        .as_deref()
        .and_then(parse_date)
    else {
        warn!("Skipping trend row for game {}: missing or invalid game date", game_id);
        return None;
    };
    // The side value is passed through untouched; the grouper validates it.
    let team_side = match field(obj, &["team_side", "teamSide", "side"]) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };

    let mut row = TrendRow::new(game_id, game_date, team_side);
    row.team_name = str_field(obj, &["team_name", "teamName", "team"]);
    row.team_abbreviation = str_field(obj, &["team_abbreviation", "teamAbbreviation", "team_abbr", "abbreviation"]);
    for category in Category::ALL {
        *row.category_mut(category) = category_trend(obj, category.key());
    }
    Some(row)
}

/// Normalize an upstream JSON array of trend rows.
pub fn parse_trend_rows(raw: &Value) -> Result<Vec<TrendRow>> {
    let Some(items) = raw.as_array() else {
        anyhow::bail!("expected a JSON array of trend rows");
    };
    Ok(items
        .iter()
        .filter_map(|item| match item.as_object() {
            Some(obj) => trend_row(obj),
            None => {
                warn!("Skipping non-object trend row");
                None
            }
        })
        .collect())
}

/// Normalize an upstream JSON array of per-game line/schedule rows.
pub fn parse_game_lines(raw: &Value) -> Result<Vec<GameLine>> {
    let Some(items) = raw.as_array() else {
        anyhow::bail!("expected a JSON array of game lines");
    };
    Ok(items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| {
            let game_id = str_field(obj, &["game_id", "gameId"])?;
            Some(GameLine {
                game_id,
                tipoff: str_field(obj, &["tipoff", "tipoff_time", "start_time", "commence_time"])
                    .as_deref()
                    .and_then(parse_timestamp),
                posted_spread: f64_field(obj, &["posted_spread", "spread", "home_spread"]),
                projected_spread: f64_field(obj, &["projected_spread", "model_spread"]),
            })
        })
        .collect())
}
