use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::source::{load_games, RowSource};
use crate::trends::rounding::{edge_magnitude, round_to_half};
use crate::trends::{game_consensus, rank_scored, CategoryConsensus, ScoredGame, SortMode};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RowSource>,
    pub default_sort: SortMode,
}

/// Build the Axum router for the dashboard API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/games", get(games_handler))
        .route("/api/games/:game_id", get(game_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

#[derive(Debug, Deserialize)]
pub struct GamesQuery {
    pub sort: Option<String>,
}

/// One ranked game as the UI consumes it.
#[derive(Debug, Serialize)]
pub struct GameSummary {
    pub game_id: String,
    pub game_date: NaiveDate,
    pub tipoff: Option<DateTime<Utc>>,
    pub away_team: Option<String>,
    pub home_team: Option<String>,
    pub ou_consensus_score: f64,
    pub ats_dominance_score: f64,
    /// Signed edge rounded to the half point
    pub edge: Option<f64>,
    /// Rounded magnitude, the value the `edge` sort orders by
    pub edge_magnitude: Option<f64>,
}

impl From<&ScoredGame> for GameSummary {
    fn from(scored: &ScoredGame) -> Self {
        let game = &scored.game;
        GameSummary {
            game_id: game.game_id.clone(),
            game_date: game.game_date,
            tipoff: game.tipoff,
            away_team: game.away.display_name().map(str::to_string),
            home_team: game.home.display_name().map(str::to_string),
            ou_consensus_score: scored.ou_consensus_score,
            ats_dominance_score: scored.ats_dominance_score,
            edge: game.spread_edge.map(round_to_half),
            edge_magnitude: game.spread_edge.map(edge_magnitude),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GamesResponse {
    pub sort: SortMode,
    pub games: Vec<GameSummary>,
    pub dropped_rows: usize,
    pub incomplete_games: usize,
}

#[derive(Debug, Serialize)]
pub struct GameDetailResponse {
    #[serde(flatten)]
    pub summary: GameSummary,
    pub consensus: Vec<CategoryConsensus>,
}

/// Resolve the requested sort, falling back to the configured default.
pub fn resolve_sort(requested: Option<&str>, default: SortMode) -> Result<SortMode, (StatusCode, String)> {
    match requested {
        None | Some("") => Ok(default),
        Some(s) => s.parse().map_err(|e: crate::trends::ranking::ParseSortModeError| {
            (StatusCode::BAD_REQUEST, e.to_string())
        }),
    }
}

async fn load_ranked(state: &AppState, sort: SortMode) -> Result<GamesResponse, (StatusCode, String)> {
    let grouped = load_games(state.source.as_ref()).await.map_err(|e| {
        warn!("Trend row fetch failed: {:#}", e);
        (StatusCode::BAD_GATEWAY, e.to_string())
    })?;
    let ranked = rank_scored(&grouped.games, sort);
    Ok(GamesResponse {
        sort,
        games: ranked.iter().map(GameSummary::from).collect(),
        dropped_rows: grouped.report.dropped_rows.len(),
        incomplete_games: grouped.report.incomplete_games.len(),
    })
}

/// GET /api/health
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "source": state.source.name(),
        "default_sort": state.default_sort,
    }))
}

/// GET /api/games?sort=time|ou-consensus|ats-dominance|edge
async fn games_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GamesQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let sort = resolve_sort(query.sort.as_deref(), state.default_sort)?;
    load_ranked(&state, sort).await.map(Json)
}

/// GET /api/games/:game_id
async fn game_handler(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let grouped = load_games(state.source.as_ref()).await.map_err(|e| {
        warn!("Trend row fetch failed: {:#}", e);
        (StatusCode::BAD_GATEWAY, e.to_string())
    })?;
    let Some(game) = grouped.games.into_iter().find(|g| g.game_id == game_id) else {
        return Err((StatusCode::NOT_FOUND, format!("game {} not found", game_id)));
    };
    let consensus = game_consensus(&game);
    let scored = ScoredGame::score(game);
    Ok(Json(GameDetailResponse {
        summary: GameSummary::from(&scored),
        consensus,
    }))
}
