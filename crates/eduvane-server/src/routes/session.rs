use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use eduvane::models::context::SessionContext;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
struct SessionResponse {
    hydrated: bool,
    context: Option<SessionContext>,
}

async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.gateway.session();
    Json(SessionResponse {
        hydrated: session.is_hydrated(),
        context: session.context().cloned(),
    })
}

async fn reset_session(State(state): State<AppState>) -> Json<Value> {
    state.gateway.reset_session();
    Json(json!({ "status": "ok" }))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/session", get(get_session))
        .route("/session/reset", post(reset_session))
        .with_state(state)
}
