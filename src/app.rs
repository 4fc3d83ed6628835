use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/goal", post(handlers::submit_goal))
        .route("/items", post(handlers::submit_item))
        .route("/items/:id/activate", post(handlers::activate_item))
        .route("/items/:id/delete", post(handlers::delete_active_item))
        .route("/history/toggle", post(handlers::toggle_history))
        .route("/history/:index/add", post(handlers::quick_add))
        .route("/history/:index/reveal", post(handlers::reveal_history_delete))
        .route("/history/:index/delete", post(handlers::delete_revealed_history))
        .route("/logs/toggle", post(handlers::toggle_logs))
        .route("/logs/:index/reveal", post(handlers::reveal_log_delete))
        .route("/logs/:index/delete", post(handlers::delete_revealed_log))
        .route("/reset", post(handlers::submit_reset))
        .route("/api/state", get(handlers::get_state))
        .route("/api/goal", post(handlers::set_goal))
        .route("/api/items", post(handlers::add_item))
        .route("/api/items/:id", delete(handlers::delete_item))
        .route("/api/history/:index/add", post(handlers::quick_add_history))
        .route("/api/history/:index", delete(handlers::delete_history))
        .route("/api/logs/:index", delete(handlers::delete_log))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
