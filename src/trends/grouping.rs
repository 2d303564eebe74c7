use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::models::{GameLine, GameTrends, TeamSide, TrendRow};

/// A row rejected because its side discriminator was not "home"/"away".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub game_id: String,
    pub team_side: String,
}

/// Diagnostics collected while grouping.  None of these are errors; they
/// describe rows and games that were left out of the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingReport {
    pub dropped_rows: Vec<DroppedRow>,
    /// `(game_id, side)` pairs where a later row overwrote an earlier one
    pub duplicates: Vec<(String, TeamSide)>,
    /// Games that never received both a validated away and home row
    pub incomplete_games: Vec<String>,
}

impl GroupingReport {
    pub fn is_clean(&self) -> bool {
        self.dropped_rows.is_empty() && self.duplicates.is_empty() && self.incomplete_games.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grouped {
    pub games: Vec<GameTrends>,
    pub report: GroupingReport,
}

/// Aggregate shell for one game while rows are still arriving.
struct PendingGame {
    game_id: String,
    game_date: NaiveDate,
    away: Option<TrendRow>,
    home: Option<TrendRow>,
}

/// Pair per-team rows into complete two-sided games.
pub fn group_rows(rows: &[TrendRow]) -> Vec<GameTrends> {
    group_rows_with_report(rows).games
}

/// Pair per-team rows into complete two-sided games, returning diagnostics
/// for everything that was left out.
///
/// * Rows whose side is not exactly "home" or "away" are dropped.
/// * A second row for an already-filled `(game_id, side)` slot replaces the
///   first one (last wins).
/// * Games missing either side are excluded.
///
/// Games are returned in the order their first valid row appeared.
pub fn group_rows_with_report(rows: &[TrendRow]) -> Grouped {
    let mut report = GroupingReport::default();
    let mut pending: Vec<PendingGame> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let Some(side) = TeamSide::parse(&row.team_side) else {
            warn!(
                "Dropping trend row for game {}: invalid side discriminator {:?}",
                row.game_id, row.team_side
            );
            report.dropped_rows.push(DroppedRow {
                game_id: row.game_id.clone(),
                team_side: row.team_side.clone(),
            });
            continue;
        };

        let idx = *index.entry(row.game_id.as_str()).or_insert_with(|| {
            pending.push(PendingGame {
                game_id: row.game_id.clone(),
                game_date: row.game_date,
                away: None,
                home: None,
            });
            pending.len() - 1
        });

        let slot = match side {
            TeamSide::Away => &mut pending[idx].away,
            TeamSide::Home => &mut pending[idx].home,
        };
        if slot.is_some() {
            warn!(
                "Duplicate {} row for game {}; keeping the later row",
                side.as_str(),
                row.game_id
            );
            report.duplicates.push((row.game_id.clone(), side));
        }
        *slot = Some(row.clone());
    }

    let mut games = Vec::with_capacity(pending.len());
    for game in pending {
        match (game.away, game.home) {
            (Some(away), Some(home)) => games.push(GameTrends {
                game_id: game.game_id,
                game_date: game.game_date,
                tipoff: None,
                spread_edge: None,
                away,
                home,
            }),
            _ => {
                debug!("Excluding incomplete game {}", game.game_id);
                report.incomplete_games.push(game.game_id);
            }
        }
    }

    debug!(
        "Grouped {} rows into {} games ({} dropped, {} duplicates, {} incomplete)",
        rows.len(),
        games.len(),
        report.dropped_rows.len(),
        report.duplicates.len(),
        report.incomplete_games.len()
    );

    Grouped { games, report }
}

/// Merge tipoff times and spread edges into grouped games.
///
/// Games without a matching line are kept unchanged; their time-based sort
/// position falls back to the game date.
pub fn attach_lines(games: Vec<GameTrends>, lines: &[GameLine]) -> Vec<GameTrends> {
    let by_id: HashMap<&str, &GameLine> = lines.iter().map(|l| (l.game_id.as_str(), l)).collect();
    games
        .into_iter()
        .map(|mut game| {
            if let Some(line) = by_id.get(game.game_id.as_str()) {
                game.tipoff = line.tipoff;
                game.spread_edge = line.edge();
            }
            game
        })
        .collect()
}
