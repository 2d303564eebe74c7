use serde::Serialize;

use super::models::{Category, GameTrends, TeamSide};
use super::rounding::round_pct;

/// Percentage above which a side is a strong ("green") signal.
pub const GREEN_THRESHOLD: f64 = 55.0;
/// Lower bound of the neutral ("yellow") band; the upper bound is
/// `GREEN_THRESHOLD` inclusive.
pub const YELLOW_FLOOR: f64 = 45.0;

/// ATS consensus for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "side", rename_all = "snake_case")]
pub enum AtsConsensus {
    None,
    Team(TeamSide),
}

/// Totals consensus for one category.  The side is the one credited with
/// the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "side", rename_all = "snake_case")]
pub enum TotalConsensus {
    Over(TeamSide),
    Under(TeamSide),
    NoConsensus,
}

/// NaN is treated like a missing value.
fn known(pct: Option<f64>) -> Option<f64> {
    pct.filter(|p| !p.is_nan())
}

fn green(pct: Option<f64>) -> bool {
    known(pct).is_some_and(|p| p > GREEN_THRESHOLD)
}

fn yellow(pct: Option<f64>) -> bool {
    known(pct).is_some_and(|p| (YELLOW_FLOOR..=GREEN_THRESHOLD).contains(&p))
}

/// Credit the side with the higher percentage; ties go to home.
fn stronger_side(away: Option<f64>, home: Option<f64>) -> TeamSide {
    match (known(away), known(home)) {
        (Some(a), Some(h)) if a > h => TeamSide::Away,
        _ => TeamSide::Home,
    }
}

/// The side with the strictly higher cover percentage.  Missing values and
/// exact ties give no consensus.
pub fn resolve_ats(away_pct: Option<f64>, home_pct: Option<f64>) -> AtsConsensus {
    match (known(away_pct), known(home_pct)) {
        (Some(a), Some(h)) if a > h => AtsConsensus::Team(TeamSide::Away),
        (Some(a), Some(h)) if h > a => AtsConsensus::Team(TeamSide::Home),
        _ => AtsConsensus::None,
    }
}

/// Totals consensus waterfall.  The rules are checked in order and the first
/// match wins; disagreement (one side strong Over, the other strong Under)
/// must be caught before the single-strong-side rules.
pub fn resolve_total(
    away_over: Option<f64>,
    away_under: Option<f64>,
    home_over: Option<f64>,
    home_under: Option<f64>,
) -> TotalConsensus {
    // 1. both strong Over
    if green(away_over) && green(home_over) {
        return TotalConsensus::Over(stronger_side(away_over, home_over));
    }
    // 2. both strong Under
    if green(away_under) && green(home_under) {
        return TotalConsensus::Under(stronger_side(away_under, home_under));
    }
    // 3. strong in opposite directions
    if (green(away_over) && green(home_under)) || (green(away_under) && green(home_over)) {
        return TotalConsensus::NoConsensus;
    }
    // 4. one strong Over, other neutral
    if green(away_over) && yellow(home_over) {
        return TotalConsensus::Over(TeamSide::Away);
    }
    if green(home_over) && yellow(away_over) {
        return TotalConsensus::Over(TeamSide::Home);
    }
    // 5. one strong Under, other neutral
    if green(away_under) && yellow(home_under) {
        return TotalConsensus::Under(TeamSide::Away);
    }
    if green(home_under) && yellow(away_under) {
        return TotalConsensus::Under(TeamSide::Home);
    }
    // 6. both neutral, 7. everything else
    TotalConsensus::NoConsensus
}

/// Both resolvers applied to one category, with display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryConsensus {
    pub category: Category,
    pub away_situation: Option<String>,
    pub home_situation: Option<String>,
    pub ats: AtsConsensus,
    /// Display name of the ATS consensus team
    pub ats_team: Option<String>,
    pub total: TotalConsensus,
    /// Display name of the side credited with the totals signal
    pub total_team: Option<String>,
    pub away_ats_pct: Option<f64>,
    pub home_ats_pct: Option<f64>,
    pub away_over_pct: Option<f64>,
    pub home_over_pct: Option<f64>,
    pub away_under_pct: Option<f64>,
    pub home_under_pct: Option<f64>,
}

/// Resolve ATS and totals consensus for every category of a game, in the
/// fixed category order.
pub fn game_consensus(game: &GameTrends) -> Vec<CategoryConsensus> {
    let name = |side: TeamSide| game.side(side).display_name().map(str::to_string);
    let display = |pct: Option<f64>| known(pct).map(round_pct);

    Category::ALL
        .iter()
        .map(|&category| {
            let away = game.away.category(category);
            let home = game.home.category(category);

            let ats = resolve_ats(away.ats_cover_pct, home.ats_cover_pct);
            let ats_team = match ats {
                AtsConsensus::Team(side) => name(side),
                AtsConsensus::None => None,
            };
            let total = resolve_total(away.over_pct, away.under_pct, home.over_pct, home.under_pct);
            let total_team = match total {
                TotalConsensus::Over(side) | TotalConsensus::Under(side) => name(side),
                TotalConsensus::NoConsensus => None,
            };

            CategoryConsensus {
                category,
                away_situation: away.situation.clone(),
                home_situation: home.situation.clone(),
                ats,
                ats_team,
                total,
                total_team,
                away_ats_pct: display(away.ats_cover_pct),
                home_ats_pct: display(home.ats_cover_pct),
                away_over_pct: display(away.over_pct),
                home_over_pct: display(home.over_pct),
                away_under_pct: display(away.under_pct),
                home_under_pct: display(home.under_pct),
            }
        })
        .collect()
}
