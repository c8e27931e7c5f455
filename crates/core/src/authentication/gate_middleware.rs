use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::app_state::AppState;

use super::gate::{GateIntent, RequestAuthView};
use super::session::{SessionMarker, MARKER_MAX_AGE_SECONDS, MARKER_VALUE, SESSION_COOKIE_NAME};

/// Marker type indicating that a request cleared the authentication gate.
///
/// Inserted into request extensions by the gate middleware and extracted
/// by handlers that require authentication to have happened.
#[derive(Clone)]
pub struct Authenticated;

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Authenticated>().cloned().ok_or(StatusCode::UNAUTHORIZED)
    }
}

/// Two-phase authentication gate middleware.
///
/// The pre-phase snapshots the request's credentials and session cookie,
/// queues a `Set-Cookie` when the gate wants a fresh marker, and tags
/// authenticated requests with the [`Authenticated`] extension. Downstream
/// handlers always run. The post-phase re-evaluates the snapshot and
/// replaces the entire response with a 401 challenge when the request
/// proved neither credentials nor a marker.
///
/// This middleware should be applied globally to all gated routes.
pub async fn authentication_gate(
    State(state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let marker = marker_cookie_value(req.headers()).map(str::to_owned);

    let view =
        RequestAuthView { authorization: authorization.as_deref(), marker: marker.as_deref() };

    let start_intent = state.gate.on_request_start(&view, Utc::now());
    if state.gate.is_authenticated(&view) {
        req.extensions_mut().insert(Authenticated);
    }

    let response = next.run(req).await;

    match state.gate.on_request_end(&view) {
        GateIntent::Challenge { realm } => challenge_response(&realm),
        _ => match start_intent {
            GateIntent::SetMarker(session_marker) => append_set_cookie(response, &session_marker),
            _ => response,
        },
    }
}

/// Pulls the session cookie value out of the `Cookie` header, if present.
fn marker_cookie_value(headers: &HeaderMap) -> Option<&str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE_NAME).then_some(value)
    })
}

/// Discards whatever downstream produced and answers with the challenge.
fn challenge_response(realm: &str) -> Response {
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header(header::WWW_AUTHENTICATE, format!("Basic realm=\"{}\"", realm))
        .body(Body::empty())
        .unwrap_or_else(|_| StatusCode::UNAUTHORIZED.into_response())
}

fn append_set_cookie(mut response: Response, marker: &SessionMarker) -> Response {
    if let Ok(value) = HeaderValue::from_str(&set_cookie_value(marker)) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// Serializes a marker into its `Set-Cookie` form. Expiry enforcement is
/// the cookie jar's job; the gate never re-reads this timestamp.
fn set_cookie_value(marker: &SessionMarker) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; Max-Age={}; Expires={}",
        SESSION_COOKIE_NAME,
        MARKER_VALUE,
        MARKER_MAX_AGE_SECONDS,
        marker.expires_at().format("%a, %d %b %Y %H:%M:%S GMT")
    )
}
