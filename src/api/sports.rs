use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::extract::ApiQuery;
use crate::error::ApiError;
use crate::lookup::find_player;
use crate::models::{
    AllStarQuery, CombinedResult, GamesQuery, PlayerStatsQuery, RosterQuery, StandingsQuery,
};
use crate::projection::{project_all, records, View};
use crate::search::enrich::{date_filter, year_filter};
use crate::state::AppState;
use crate::upstream::Endpoint;

async fn fetch(state: &AppState, endpoint: Endpoint) -> Result<Value, ApiError> {
    state.sports.fetch(&endpoint).await.map_err(ApiError::Fetch)
}

/// GET /games - Games on a day, projected to the game view, plus an optional
/// semantic search scoped to that date.
pub async fn games(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<GamesQuery>,
) -> Result<Json<CombinedResult>, ApiError> {
    let (games, search_results) = tokio::try_join!(
        fetch(&state, Endpoint::GamesByDate(q.day.clone())),
        state.enricher.enrich(q.message.as_deref(), date_filter(&q.day)),
    )?;

    let game_data = project_all(records(&games, View::Game)?, View::Game)?;
    Ok(Json(CombinedResult::new("game_data", game_data, search_results)))
}

/// GET /year_standings - Raw standings for a season.
pub async fn year_standings(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<StandingsQuery>,
) -> Result<Json<Value>, ApiError> {
    fetch(&state, Endpoint::StandingsByYear(q.year)).await.map(Json)
}

/// GET /allstar_roster - All-star roster for a season plus an optional
/// semantic search scoped to that year.
pub async fn allstar_roster(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<AllStarQuery>,
) -> Result<Json<CombinedResult>, ApiError> {
    let (roster, search_results) = tokio::try_join!(
        fetch(&state, Endpoint::AllStarsByYear(q.year.clone())),
        state.enricher.enrich(q.message.as_deref(), year_filter(&q.year)),
    )?;

    Ok(Json(CombinedResult::new("all_star_roster", roster, search_results)))
}

/// GET /current_roster_list - Raw active roster for a team.
pub async fn current_roster_list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<RosterQuery>,
) -> Result<Json<Value>, ApiError> {
    fetch(&state, Endpoint::RosterByTeam(q.team_abv)).await.map(Json)
}

/// GET /player_stats_by_date - One player's box score on a date, or `null`
/// when the player has no line that day.
pub async fn player_stats_by_date(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<PlayerStatsQuery>,
) -> Result<Json<Option<Value>>, ApiError> {
    let player_id = match q.player_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            ApiError::BadRequest(format!("player_id must be an integer, got `{raw}`"))
        })?),
        None => None,
    };
    let player_name = q
        .player_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    if player_id.is_none() && player_name.is_none() {
        return Err(ApiError::BadRequest(
            "player_id or player_name is required".to_string(),
        ));
    }

    let stats = fetch(&state, Endpoint::PlayerStatsByDate(q.date.clone())).await?;
    let lines = records(&stats, View::PlayerStat)?;

    let found = find_player(lines, player_id, player_name)?;
    if found.is_none() {
        tracing::info!(
            "No stat line for player (id: {player_id:?}, name: {player_name:?}) on {}",
            q.date
        );
    }
    Ok(Json(found))
}
