//! Reliability-weighted game scores used for ranking.
//!
//! Both scores sum a per-category contribution over the five situational
//! categories.  Sample sizes come only from the record strings; the
//! percentages are taken as given.

use serde::Serialize;

use super::consensus::GREEN_THRESHOLD;
use super::models::{Category, GameTrends};
use super::record::parse_record;

/// Minimum record total on each side for a category to count.
pub const MIN_SAMPLE: u32 = 5;
/// ATS cover-percentage gap that must be strictly exceeded.
pub const ATS_GAP_THRESHOLD: f64 = 10.0;

/// A game annotated with both scores.  Built per ranking call and never
/// stored back on the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredGame {
    pub game: GameTrends,
    pub ou_consensus_score: f64,
    pub ats_dominance_score: f64,
}

impl ScoredGame {
    pub fn score(game: GameTrends) -> Self {
        let ou_consensus_score = ou_consensus_score(&game);
        let ats_dominance_score = ats_dominance_score(&game);
        ScoredGame {
            game,
            ou_consensus_score,
            ats_dominance_score,
        }
    }
}

fn both_above(away: Option<f64>, home: Option<f64>, threshold: f64) -> Option<(f64, f64)> {
    match (away, home) {
        (Some(a), Some(h)) if a > threshold && h > threshold => Some((a, h)),
        _ => None,
    }
}

/// OU contribution of one category.
///
/// Requires both sides above the green threshold in the same direction
/// (Over checked first) and at least `MIN_SAMPLE` OU games on each side.
/// Contribution is the sample-weighted mean percentage times the smaller
/// sample.
pub fn ou_category_contribution(game: &GameTrends, category: Category) -> f64 {
    let away = game.away.category(category);
    let home = game.home.category(category);
    let away_n = parse_record(away.ou_record.as_deref()).total;
    let home_n = parse_record(home.ou_record.as_deref()).total;
    if away_n < MIN_SAMPLE || home_n < MIN_SAMPLE {
        return 0.0;
    }

    let Some((away_pct, home_pct)) = both_above(away.over_pct, home.over_pct, GREEN_THRESHOLD)
        .or_else(|| both_above(away.under_pct, home.under_pct, GREEN_THRESHOLD))
    else {
        return 0.0;
    };

    let (an, hn) = (f64::from(away_n), f64::from(home_n));
    let avg = (away_pct * an + home_pct * hn) / (an + hn);
    avg * f64::from(away_n.min(home_n))
}

/// ATS contribution of one category: the cover-percentage gap times the
/// smaller ATS sample, when the gap exceeds `ATS_GAP_THRESHOLD` and both
/// samples reach `MIN_SAMPLE`.
pub fn ats_category_contribution(game: &GameTrends, category: Category) -> f64 {
    let away = game.away.category(category);
    let home = game.home.category(category);
    let (Some(away_pct), Some(home_pct)) = (away.ats_cover_pct, home.ats_cover_pct) else {
        return 0.0;
    };
    let min_games = parse_record(away.ats_record.as_deref())
        .total
        .min(parse_record(home.ats_record.as_deref()).total);
    let gap = (away_pct - home_pct).abs();
    if min_games < MIN_SAMPLE || gap.is_nan() || gap <= ATS_GAP_THRESHOLD {
        return 0.0;
    }
    gap * f64::from(min_games)
}

/// Over/Under consensus strength.
pub fn ou_consensus_score(game: &GameTrends) -> f64 {
    Category::ALL
        .iter()
        .map(|&c| ou_category_contribution(game, c))
        .sum()
}

/// Against-the-spread dominance.
pub fn ats_dominance_score(game: &GameTrends) -> f64 {
    Category::ALL
        .iter()
        .map(|&c| ats_category_contribution(game, c))
        .sum()
}
