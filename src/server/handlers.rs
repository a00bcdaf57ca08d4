//! Axum request handlers.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::form_urlencoded;

use super::AppState;
use crate::engines::{self, DefaultOptions, Engine, Options, Prompt};
use crate::login::{self, escape_html, LoginPage};
use crate::session::SessionError;

#[derive(Debug, Deserialize)]
pub(super) struct LoginQuery {
    callbackurl: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EnginesQuery {
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Debug, Serialize)]
pub(super) struct OptionsResponse {
    options: Options,
    defaults: DefaultOptions,
}

fn session_failure(e: SessionError) -> Response {
    error!("Session lookup failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "session lookup failed").into_response()
}

/// GET /login: redirect signed-in users, otherwise show sign-in options.
pub(super) async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
    headers: HeaderMap,
) -> Response {
    match login::render_login_page(
        state.provider.as_ref(),
        &headers,
        query.callbackurl.as_deref(),
        &state.gate,
    ) {
        Ok(LoginPage::Redirect(target)) => Redirect::to(&target).into_response(),
        Ok(LoginPage::SignIn(view)) => Html(view.render()).into_response(),
        Err(e) => session_failure(e),
    }
}

/// GET /app: home placeholder, sign-in required.
pub(super) async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.provider.current_session(&headers) {
        Ok(Some(session)) => Html(format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Scoopika</title></head>\n<body><p>Signed in as {}</p></body>\n</html>\n",
            escape_html(&session.user)
        ))
        .into_response(),
        Ok(None) => {
            let callback: String =
                form_urlencoded::byte_serialize(state.gate.home_route.as_bytes()).collect();
            debug!("No session for {}, sending to login", state.gate.home_route);
            Redirect::to(&format!("/login?callbackurl={}", callback)).into_response()
        }
        Err(e) => session_failure(e),
    }
}

/// GET /api/engines?type=<modality>
pub(super) async fn list_engines(
    Query(query): Query<EnginesQuery>,
) -> Json<BTreeMap<String, Engine>> {
    Json(engines::get_engines(&query.kind))
}

/// POST /api/options: option descriptors and defaults for a prompt.
pub(super) async fn resolve_options(Json(prompt): Json<Prompt>) -> Json<OptionsResponse> {
    let options = engines::get_options(&prompt);
    let defaults = engines::get_default_options(&options);
    Json(OptionsResponse { options, defaults })
}
