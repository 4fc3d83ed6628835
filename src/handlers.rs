use crate::errors::AppError;
use crate::models::{AddItemRequest, GoalRequest, ResetRequest, SnapshotResponse};
use crate::state::{App, AppState};
use crate::tracker::ResetOutcome;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, State},
    response::{Html, Redirect},
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let app = state.app.lock().await;
    Html(render_index(&app.tracker, &app.view))
}

pub async fn submit_goal(State(state): State<AppState>, Form(form): Form<GoalRequest>) -> Redirect {
    let mut app = state.app.lock().await;
    if app.tracker.set_goal(&form.goal) {
        app.view.goal_draft.clear();
    } else {
        app.view.goal_draft = form.goal;
    }
    Redirect::to("/")
}

pub async fn submit_item(State(state): State<AppState>, Form(form): Form<AddItemRequest>) -> Redirect {
    let mut app = state.app.lock().await;
    app.tracker.add_item(&form.name, &form.kcal);
    Redirect::to("/")
}

pub async fn activate_item(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    state.app.lock().await.view.toggle_item(id);
    Redirect::to("/")
}

pub async fn delete_active_item(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    let mut app = state.app.lock().await;
    if app.view.active_item() == Some(id) {
        remove_item(&mut app, id);
    }
    Redirect::to("/")
}

pub async fn toggle_history(State(state): State<AppState>) -> Redirect {
    state.app.lock().await.view.toggle_history_panel();
    Redirect::to("/")
}

pub async fn quick_add(State(state): State<AppState>, Path(index): Path<usize>) -> Redirect {
    state.app.lock().await.tracker.quick_add(index);
    Redirect::to("/")
}

pub async fn reveal_history_delete(State(state): State<AppState>, Path(index): Path<usize>) -> Redirect {
    state.app.lock().await.view.toggle_history_delete(index);
    Redirect::to("/")
}

pub async fn delete_revealed_history(State(state): State<AppState>, Path(index): Path<usize>) -> Redirect {
    let mut app = state.app.lock().await;
    if app.view.history_delete_visible(index) {
        remove_history(&mut app, index);
    }
    Redirect::to("/")
}

pub async fn toggle_logs(State(state): State<AppState>) -> Redirect {
    state.app.lock().await.view.toggle_log_panel();
    Redirect::to("/")
}

pub async fn reveal_log_delete(State(state): State<AppState>, Path(index): Path<usize>) -> Redirect {
    state.app.lock().await.view.toggle_log_delete(index);
    Redirect::to("/")
}

pub async fn delete_revealed_log(State(state): State<AppState>, Path(index): Path<usize>) -> Redirect {
    let mut app = state.app.lock().await;
    if app.view.log_delete_visible(index) {
        remove_log(&mut app, index);
    }
    Redirect::to("/")
}

pub async fn submit_reset(State(state): State<AppState>, Form(form): Form<ResetRequest>) -> Redirect {
    apply_reset(&mut *state.app.lock().await, form.confirm);
    Redirect::to("/")
}

pub async fn get_state(State(state): State<AppState>) -> Json<SnapshotResponse> {
    Json(state.app.lock().await.tracker.snapshot())
}

pub async fn set_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let mut app = state.app.lock().await;
    if app.tracker.goal().is_some() {
        return Err(AppError::bad_request("goal is already set"));
    }
    if !app.tracker.set_goal(&payload.goal) {
        return Err(AppError::bad_request("goal must be a number"));
    }
    Ok(Json(app.tracker.snapshot()))
}

pub async fn add_item(
    State(state): State<AppState>,
    Json(payload): Json<AddItemRequest>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let mut app = state.app.lock().await;
    if app.tracker.add_item(&payload.name, &payload.kcal).is_none() {
        return Err(AppError::bad_request("name and numeric kcal are required"));
    }
    Ok(Json(app.tracker.snapshot()))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let mut app = state.app.lock().await;
    if !remove_item(&mut app, id) {
        return Err(AppError::not_found(format!("no item with id {id}")));
    }
    Ok(Json(app.tracker.snapshot()))
}

pub async fn quick_add_history(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let mut app = state.app.lock().await;
    if app.tracker.quick_add(index).is_none() {
        return Err(AppError::not_found(format!("no history entry at {index}")));
    }
    Ok(Json(app.tracker.snapshot()))
}

pub async fn delete_history(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let mut app = state.app.lock().await;
    if !remove_history(&mut app, index) {
        return Err(AppError::not_found(format!("no history entry at {index}")));
    }
    Ok(Json(app.tracker.snapshot()))
}

pub async fn delete_log(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let mut app = state.app.lock().await;
    if !remove_log(&mut app, index) {
        return Err(AppError::not_found(format!("no daily log at {index}")));
    }
    Ok(Json(app.tracker.snapshot()))
}

pub async fn reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequest>,
) -> Json<SnapshotResponse> {
    let mut app = state.app.lock().await;
    apply_reset(&mut app, payload.confirm);
    Json(app.tracker.snapshot())
}

fn remove_item(app: &mut App, id: i64) -> bool {
    let removed = app.tracker.delete_item(id);
    if removed {
        app.view.item_removed(id);
    }
    removed
}

fn remove_history(app: &mut App, index: usize) -> bool {
    let removed = app.tracker.delete_history(index);
    if let Some(entry) = &removed {
        info!("removed {} from history", entry.name);
        app.view.history_removed(index);
    }
    removed.is_some()
}

fn remove_log(app: &mut App, index: usize) -> bool {
    let removed = app.tracker.delete_log(index);
    if let Some(entry) = &removed {
        info!("removed daily log for {}", entry.date);
        app.view.log_removed(index);
    }
    removed.is_some()
}

fn apply_reset(app: &mut App, confirmed: bool) {
    if let ResetOutcome::Cleared { .. } = app.tracker.reset(confirmed) {
        app.view.session_reset();
    }
}
