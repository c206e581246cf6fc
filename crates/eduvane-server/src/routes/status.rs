use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Status {
    name: &'static str,
    version: &'static str,
    engine: &'static str,
}

async fn status() -> Json<Status> {
    Json(Status {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        engine: "unavailable",
    })
}

pub fn routes() -> Router {
    Router::new().route("/status", get(status))
}
