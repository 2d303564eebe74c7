use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the game a trend row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Away,
    Home,
}

impl TeamSide {
    /// Strict discriminator check: only the exact strings `"home"` and
    /// `"away"` are accepted.  `"HOME"`, `" away"` etc. are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "away" => Some(TeamSide::Away),
            "home" => Some(TeamSide::Home),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamSide::Away => "away",
            TeamSide::Home => "home",
        }
    }
}

/// The five fixed situational categories, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Result of the team's previous game
    LastGame,
    /// Team is favorite or underdog
    FavoriteUnderdog,
    /// Home/away combined with favorite/underdog
    SideFavoriteUnderdog,
    /// Days of rest
    RestBucket,
    /// Rest relative to the opponent
    RestComparison,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::LastGame,
        Category::FavoriteUnderdog,
        Category::SideFavoriteUnderdog,
        Category::RestBucket,
        Category::RestComparison,
    ];

    /// Column prefix used by upstream row sets.
    pub fn key(&self) -> &'static str {
        match self {
            Category::LastGame => "last_game",
            Category::FavoriteUnderdog => "fav_dog",
            Category::SideFavoriteUnderdog => "side_fav_dog",
            Category::RestBucket => "rest_bucket",
            Category::RestComparison => "rest_comp",
        }
    }
}

/// One team's history in one situational category.
///
/// Percentages are pre-computed upstream and may disagree with the record
/// strings; the records are only used as sample sizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrend {
    /// Situation label, e.g. "after_win", "favorite", "home_dog", "1_day"
    pub situation: Option<String>,
    /// Against-the-spread record, "W-L-P"
    pub ats_record: Option<String>,
    /// ATS cover percentage (0–100)
    pub ats_cover_pct: Option<f64>,
    /// Over/under record, "O-U-P"
    pub ou_record: Option<String>,
    /// Over percentage (0–100)
    pub over_pct: Option<f64>,
    /// Under percentage (0–100)
    pub under_pct: Option<f64>,
}

/// One team's situational trends for one game, in the strict engine schema.
///
/// The side discriminator is kept as the raw upstream string; validating it
/// is the grouper's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    pub game_id: String,
    pub game_date: NaiveDate,
    /// Expected to be exactly "home" or "away"
    pub team_side: String,
    pub team_name: Option<String>,
    pub team_abbreviation: Option<String>,
    pub last_game: CategoryTrend,
    pub fav_dog: CategoryTrend,
    pub side_fav_dog: CategoryTrend,
    pub rest_bucket: CategoryTrend,
    pub rest_comp: CategoryTrend,
}

impl TrendRow {
    /// Row with every category empty.
    pub fn new(game_id: impl Into<String>, game_date: NaiveDate, team_side: impl Into<String>) -> Self {
        TrendRow {
            game_id: game_id.into(),
            game_date,
            team_side: team_side.into(),
            team_name: None,
            team_abbreviation: None,
            last_game: CategoryTrend::default(),
            fav_dog: CategoryTrend::default(),
            side_fav_dog: CategoryTrend::default(),
            rest_bucket: CategoryTrend::default(),
            rest_comp: CategoryTrend::default(),
        }
    }

    pub fn category(&self, category: Category) -> &CategoryTrend {
        match category {
            Category::LastGame => &self.last_game,
            Category::FavoriteUnderdog => &self.fav_dog,
            Category::SideFavoriteUnderdog => &self.side_fav_dog,
            Category::RestBucket => &self.rest_bucket,
            Category::RestComparison => &self.rest_comp,
        }
    }

    pub fn category_mut(&mut self, category: Category) -> &mut CategoryTrend {
        match category {
            Category::LastGame => &mut self.last_game,
            Category::FavoriteUnderdog => &mut self.fav_dog,
            Category::SideFavoriteUnderdog => &mut self.side_fav_dog,
            Category::RestBucket => &mut self.rest_bucket,
            Category::RestComparison => &mut self.rest_comp,
        }
    }

    /// Abbreviation if known, otherwise the team name.
    pub fn display_name(&self) -> Option<&str> {
        self.team_abbreviation
            .as_deref()
            .or(self.team_name.as_deref())
    }
}

/// Secondary per-game lookup merged after grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLine {
    pub game_id: String,
    pub tipoff: Option<DateTime<Utc>>,
    /// Posted spread from the home team's perspective
    pub posted_spread: Option<f64>,
    /// Model-projected spread from the home team's perspective
    pub projected_spread: Option<f64>,
}

impl GameLine {
    /// Signed edge of the projection over the posted line, unrounded.
    pub fn edge(&self) -> Option<f64> {
        match (self.projected_spread, self.posted_spread) {
            (Some(projected), Some(posted)) => Some(projected - posted),
            _ => None,
        }
    }
}

/// A complete two-sided game: both slots hold a row whose side discriminator
/// matches the slot.  Only the grouper builds these from raw rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTrends {
    pub game_id: String,
    pub game_date: NaiveDate,
    pub tipoff: Option<DateTime<Utc>>,
    /// Signed spread edge from the line lookup, unrounded
    pub spread_edge: Option<f64>,
    pub away: TrendRow,
    pub home: TrendRow,
}

impl GameTrends {
    pub fn side(&self, side: TeamSide) -> &TrendRow {
        match side {
            TeamSide::Away => &self.away,
            TeamSide::Home => &self.home,
        }
    }
}
