use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/results", post(handlers::submit_form))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/results", get(handlers::list_results).post(handlers::create_result))
        .with_state(state)
}
