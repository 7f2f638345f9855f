use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Json, Redirect, Response},
};

use super::AppState;
use crate::error::ViewError;
use crate::view::PageModel;

/// GET / : the page for the current state
pub(super) async fn handle_index(State(state): State<AppState>) -> Response {
    let page = PageModel::build(&state.controller.snapshot(), &state.ctx);
    match state.html.render(&page) {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!("page render failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "page render failed").into_response()
        }
    }
}

/// POST /search : start a search in the background and go back to the page
pub(super) async fn handle_search(State(state): State<AppState>) -> Response {
    match state.controller.begin() {
        Ok(()) => {
            let controller = state.controller.clone();
            tokio::spawn(async move {
                controller.run().await;
            });
            Redirect::to("/").into_response()
        }
        Err(ViewError::SearchInProgress) => {
            tracing::warn!("search rejected: one is already running");
            let body = serde_json::json!({"error": ViewError::SearchInProgress.to_string()});
            (StatusCode::CONFLICT, Json(body)).into_response()
        }
    }
}

/// GET /api/state : the view state as JSON, without the image payload
pub(super) async fn handle_state(State(state): State<AppState>) -> Response {
    let snapshot = state.controller.snapshot();
    Json(snapshot.summary()).into_response()
}

/// GET /infographic : the current image, decoded
pub(super) async fn handle_infographic(State(state): State<AppState>) -> Response {
    let snapshot = state.controller.snapshot();
    let Some(image) = snapshot.image() else {
        return (StatusCode::NOT_FOUND, "no infographic available").into_response();
    };

    match image.decode() {
        Ok(bytes) => ([(header::CONTENT_TYPE, image.mime_type.clone())], bytes).into_response(),
        Err(e) => {
            tracing::error!("infographic payload is not valid base64: {e}");
            (StatusCode::BAD_GATEWAY, "infographic payload is corrupt").into_response()
        }
    }
}

/// GET /health : liveness plus the current phase
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let body = serde_json::json!({
        "status": "ok",
        "phase": state.controller.snapshot().phase(),
    });
    Json(body)
}
