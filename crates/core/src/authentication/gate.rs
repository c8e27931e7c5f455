use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::credentials::BasicAuthCredentials;
use super::session::SessionMarker;
use super::validator::CredentialValidator;

/// Request-scoped snapshot the transport hands to the gate: the raw
/// `Authorization` header value and the session cookie value, if any.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestAuthView<'a> {
    pub authorization: Option<&'a str>,
    pub marker: Option<&'a str>,
}

/// What the transport should do on behalf of the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateIntent {
    /// Leave the request and response untouched.
    NoAction,
    /// Attach the marker to the outgoing response.
    SetMarker(SessionMarker),
    /// Clear the response body and answer 401 with a challenge for the realm.
    Challenge { realm: String },
}

/// Per-request authentication decision logic.
///
/// Holds no per-request state, so a single instance is safe to share
/// across unbounded concurrent requests. The realm and validator are
/// immutable after construction.
pub struct AuthGate {
    realm: String,
    validator: Arc<dyn CredentialValidator>,
}

impl AuthGate {
    pub fn new(realm: String, validator: Arc<dyn CredentialValidator>) -> Self {
        Self { realm, validator }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Pre-processing phase.
    ///
    /// Requests carrying valid credentials but no marker yet get a fresh
    /// marker issued at `now`. This phase never blocks the request;
    /// downstream processing always continues.
    pub fn on_request_start(
        &self,
        request: &RequestAuthView<'_>,
        now: DateTime<Utc>,
    ) -> GateIntent {
        if self.has_valid_credentials(request.authorization)
            && !SessionMarker::matches(request.marker)
        {
            GateIntent::SetMarker(SessionMarker::issue(now))
        } else {
            GateIntent::NoAction
        }
    }

    /// Post-processing phase.
    ///
    /// Requests that presented neither valid credentials nor a marker get
    /// challenged. This runs after the downstream pipeline so the 401 can
    /// override whatever the handlers wrote.
    pub fn on_request_end(&self, request: &RequestAuthView<'_>) -> GateIntent {
        if !self.has_valid_credentials(request.authorization)
            && !SessionMarker::matches(request.marker)
        {
            GateIntent::Challenge { realm: self.realm.clone() }
        } else {
            GateIntent::NoAction
        }
    }

    /// Whether the request is authenticated at all, by credentials or by
    /// a previously issued marker.
    pub fn is_authenticated(&self, request: &RequestAuthView<'_>) -> bool {
        self.has_valid_credentials(request.authorization)
            || SessionMarker::matches(request.marker)
    }

    // Every parse failure collapses into "not authenticated".
    fn has_valid_credentials(&self, authorization: Option<&str>) -> bool {
        BasicAuthCredentials::parse(authorization)
            .map(|credentials| self.validator.validate(&credentials))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::super::validator::SingleCredentialValidator;
    use super::*;
    use base64::{engine::general_purpose, Engine as _};
    use chrono::Duration;

    fn gate() -> AuthGate {
        let validator = Arc::new(SingleCredentialValidator::new(
            "admin".to_string(),
            "secret123".to_string(),
        ));
        AuthGate::new("Restricted".to_string(), validator)
    }

    fn basic_header(pair: &str) -> String {
        format!("Basic {}", general_purpose::STANDARD.encode(pair))
    }

    #[test]
    fn test_start_issues_marker_for_valid_credentials_without_marker() {
        let header = basic_header("admin:secret123");
        let view = RequestAuthView { authorization: Some(&header), marker: None };
        let now = Utc::now();

        match gate().on_request_start(&view, now) {
            GateIntent::SetMarker(marker) => {
                assert_eq!(marker.expires_at(), now + Duration::hours(6));
            }
            other => panic!("expected SetMarker, got {:?}", other),
        }
    }

    #[test]
    fn test_start_does_not_reissue_marker() {
        let header = basic_header("admin:secret123");
        let view = RequestAuthView { authorization: Some(&header), marker: Some("1") };

        assert_eq!(gate().on_request_start(&view, Utc::now()), GateIntent::NoAction);
    }

    #[test]
    fn test_start_ignores_invalid_credentials() {
        let header = basic_header("admin:wrong");
        let view = RequestAuthView { authorization: Some(&header), marker: None };

        assert_eq!(gate().on_request_start(&view, Utc::now()), GateIntent::NoAction);
    }

    #[test]
    fn test_end_challenges_when_unauthenticated_and_unmarked() {
        let view = RequestAuthView { authorization: None, marker: None };

        assert_eq!(
            gate().on_request_end(&view),
            GateIntent::Challenge { realm: "Restricted".to_string() }
        );
    }

    #[test]
    fn test_end_allows_valid_credentials() {
        let header = basic_header("admin:secret123");
        let view = RequestAuthView { authorization: Some(&header), marker: None };

        assert_eq!(gate().on_request_end(&view), GateIntent::NoAction);
    }

    #[test]
    fn test_end_allows_marker_without_credentials() {
        let view = RequestAuthView { authorization: None, marker: Some("1") };

        assert_eq!(gate().on_request_end(&view), GateIntent::NoAction);
    }

    #[test]
    fn test_marker_only_requests_are_never_challenged_on_repeat() {
        let gate = gate();
        let view = RequestAuthView { authorization: None, marker: Some("1") };

        for _ in 0..10 {
            assert_eq!(gate.on_request_start(&view, Utc::now()), GateIntent::NoAction);
            assert_eq!(gate.on_request_end(&view), GateIntent::NoAction);
        }
    }

    #[test]
    fn test_malformed_header_fails_closed() {
        let view = RequestAuthView { authorization: Some("Basic %%%"), marker: None };
        let gate = gate();

        assert!(!gate.is_authenticated(&view));
        assert_eq!(
            gate.on_request_end(&view),
            GateIntent::Challenge { realm: "Restricted".to_string() }
        );
    }

    #[test]
    fn test_colon_in_password_is_treated_as_unauthenticated() {
        let header = basic_header("admin:se:cret");
        let view = RequestAuthView { authorization: Some(&header), marker: None };

        assert!(!gate().is_authenticated(&view));
    }
}
