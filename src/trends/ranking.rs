use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::models::GameTrends;
use super::rounding::edge_magnitude;
use super::scoring::ScoredGame;

/// How a game list is ordered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Ascending tipoff; games without a tipoff last; then by date
    #[default]
    Time,
    /// Descending Over/Under consensus strength
    OuConsensus,
    /// Descending ATS dominance
    AtsDominance,
    /// Descending displayed spread-edge magnitude; games without an edge last
    Edge,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Time => "time",
            SortMode::OuConsensus => "ou-consensus",
            SortMode::AtsDominance => "ats-dominance",
            SortMode::Edge => "edge",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode {0:?} (expected time, ou-consensus, ats-dominance or edge)")]
pub struct ParseSortModeError(pub String);

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(SortMode::Time),
            "ou-consensus" => Ok(SortMode::OuConsensus),
            "ats-dominance" => Ok(SortMode::AtsDominance),
            "edge" => Ok(SortMode::Edge),
            other => Err(ParseSortModeError(other.to_string())),
        }
    }
}

/// Known values first, then ascending; `None` last.
fn some_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_time(a: &GameTrends, b: &GameTrends) -> Ordering {
    some_first(a.tipoff, b.tipoff).then_with(|| a.game_date.cmp(&b.game_date))
}

fn by_edge(a: &GameTrends, b: &GameTrends) -> Ordering {
    let ea = a.spread_edge.map(edge_magnitude).filter(|e| !e.is_nan());
    let eb = b.spread_edge.map(edge_magnitude).filter(|e| !e.is_nan());
    match (ea, eb) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Score every game and order the result.  Sorting is stable, so games that
/// compare equal keep their input order, and ranking is idempotent.
pub fn rank_scored(games: &[GameTrends], mode: SortMode) -> Vec<ScoredGame> {
    let mut scored: Vec<ScoredGame> = games.iter().cloned().map(ScoredGame::score).collect();
    match mode {
        SortMode::Time => scored.sort_by(|a, b| by_time(&a.game, &b.game)),
        SortMode::OuConsensus => {
            scored.sort_by(|a, b| b.ou_consensus_score.total_cmp(&a.ou_consensus_score))
        }
        SortMode::AtsDominance => {
            scored.sort_by(|a, b| b.ats_dominance_score.total_cmp(&a.ats_dominance_score))
        }
        SortMode::Edge => scored.sort_by(|a, b| by_edge(&a.game, &b.game)),
    }
    scored
}

/// Order games for display.  Scores are computed for the sort and dropped.
pub fn rank(games: &[GameTrends], mode: SortMode) -> Vec<GameTrends> {
    rank_scored(games, mode)
        .into_iter()
        .map(|s| s.game)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::models::{Category, TrendRow};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn game(id: &str, day: u32, hour: Option<u32>) -> GameTrends {
        let date = NaiveDate::from_ymd_opt(2025, 4, day).unwrap();
        GameTrends {
            game_id: id.into(),
            game_date: date,
            tipoff: hour.map(|h| Utc.with_ymd_and_hms(2025, 4, day, h, 0, 0).unwrap()),
            spread_edge: None,
            away: TrendRow::new(id, date, "away"),
            home: TrendRow::new(id, date, "home"),
        }
    }

    fn with_ats_gap(mut g: GameTrends, gap: f64) -> GameTrends {
        let a = g.away.category_mut(Category::FavoriteUnderdog);
        a.ats_record = Some("6-4-0".into());
        a.ats_cover_pct = Some(50.0 + gap);
        let h = g.home.category_mut(Category::FavoriteUnderdog);
        h.ats_record = Some("5-5-0".into());
        h.ats_cover_pct = Some(50.0);
        g
    }

    fn with_over(mut g: GameTrends, pct: f64) -> GameTrends {
        for row in [&mut g.away, &mut g.home] {
            let c = row.category_mut(Category::LastGame);
            c.ou_record = Some("6-4-0".into());
            c.over_pct = Some(pct);
        }
        g
    }

    fn ids(games: &[GameTrends]) -> Vec<&str> {
        games.iter().map(|g| g.game_id.as_str()).collect()
    }

    #[test]
    fn time_orders_by_tipoff_then_unknown_by_date() {
        let games = vec![
            game("late-no-time", 3, None),
            game("evening", 2, Some(23)),
            game("early-no-time", 1, None),
            game("afternoon", 2, Some(17)),
        ];
        let ranked = rank(&games, SortMode::Time);
        assert_eq!(ids(&ranked), vec!["afternoon", "evening", "early-no-time", "late-no-time"]);
    }

    #[test]
    fn time_ranking_is_idempotent() {
        let games = vec![
            game("a", 2, None),
            game("b", 1, Some(12)),
            game("c", 2, None),
            game("d", 1, Some(12)),
        ];
        let once = rank(&games, SortMode::Time);
        let twice = rank(&once, SortMode::Time);
        assert_eq!(ids(&once), ids(&twice));
        assert_eq!(ids(&once), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn ats_dominance_descending() {
        let games = vec![
            with_ats_gap(game("small", 1, None), 12.0),
            with_ats_gap(game("none", 1, None), 5.0),
            with_ats_gap(game("big", 1, None), 30.0),
        ];
        let ranked = rank_scored(&games, SortMode::AtsDominance);
        let order: Vec<&str> = ranked.iter().map(|s| s.game.game_id.as_str()).collect();
        assert_eq!(order, vec!["big", "small", "none"]);
        assert_eq!(ranked[2].ats_dominance_score, 0.0);
    }

    #[test]
    fn ou_consensus_descending_with_stable_ties() {
        let games = vec![
            game("zero-1", 1, None),
            with_over(game("mid", 1, None), 60.0),
            game("zero-2", 1, None),
            with_over(game("top", 1, None), 75.0),
        ];
        let ranked = rank(&games, SortMode::OuConsensus);
        assert_eq!(ids(&ranked), vec!["top", "mid", "zero-1", "zero-2"]);
    }

    #[test]
    fn edge_sorts_on_displayed_magnitude() {
        let mut a = game("a", 1, None);
        a.spread_edge = Some(-2.2); // shows 2.0
        let mut b = game("b", 1, None);
        b.spread_edge = Some(1.9); // shows 2.0
        let mut c = game("c", 1, None);
        c.spread_edge = Some(-3.3); // shows 3.5
        let d = game("d", 1, None);
        let ranked = rank(&[d, a, b, c], SortMode::Edge);
        // a and b display the same edge, so input order holds
        assert_eq!(ids(&ranked), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn ranking_does_not_mutate_input() {
        let games = vec![game("x", 2, None), game("y", 1, None)];
        let before = games.clone();
        let _ = rank(&games, SortMode::Time);
        assert_eq!(games, before);
    }

    #[test]
    fn sort_mode_round_trips_through_str() {
        for mode in [SortMode::Time, SortMode::OuConsensus, SortMode::AtsDominance, SortMode::Edge] {
            assert_eq!(mode.as_str().parse::<SortMode>(), Ok(mode));
        }
        assert!("OU".parse::<SortMode>().is_err());
    }

    #[test]
    fn sort_mode_deserializes_kebab_case() {
        let mode: SortMode = serde_json::from_str("\"ats-dominance\"").unwrap();
        assert_eq!(mode, SortMode::AtsDominance);
    }
}
