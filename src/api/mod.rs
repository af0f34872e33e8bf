pub mod auth;
pub mod extract;
pub mod sports;

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// All routes, each behind the bearer-token check.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/games", get(sports::games))
        .route("/year_standings", get(sports::year_standings))
        .route("/allstar_roster", get(sports::allstar_roster))
        .route("/current_roster_list", get(sports::current_roster_list))
        .route("/player_stats_by_date", get(sports::player_stats_by_date))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ))
        .with_state(state)
}
