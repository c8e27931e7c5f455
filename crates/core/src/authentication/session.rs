use chrono::{DateTime, Duration, Utc};

/// Name of the cookie that marks a client as already authenticated.
pub const SESSION_COOKIE_NAME: &str = "authgate_session";

/// Sentinel stored in the session cookie.
pub(crate) const MARKER_VALUE: &str = "1";

const MARKER_TTL_HOURS: i64 = 6;

/// Marker lifetime in seconds, for the cookie's `Max-Age` attribute.
pub(crate) const MARKER_MAX_AGE_SECONDS: i64 = MARKER_TTL_HOURS * 60 * 60;

/// Client-held token asserting a previous successful authentication.
///
/// The marker is not bound to the credential in any way. Whoever presents
/// the sentinel within the cookie's lifetime is trusted, which is exactly
/// as strong as the transport keeping the cookie private.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMarker {
    expires_at: DateTime<Utc>,
}

impl SessionMarker {
    /// Issues a fresh marker expiring six hours from `now`.
    pub fn issue(now: DateTime<Utc>) -> Self {
        Self { expires_at: now + Duration::hours(MARKER_TTL_HOURS) }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether a cookie value presented by the client counts as a marker.
    ///
    /// Only the sentinel value is checked. The client cookie jar drops
    /// expired cookies, so no time comparison happens here.
    pub fn matches(value: Option<&str>) -> bool {
        value == Some(MARKER_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_six_hour_expiry() {
        let now = Utc::now();
        let marker = SessionMarker::issue(now);

        assert_eq!(marker.expires_at(), now + Duration::hours(6));
    }

    #[test]
    fn test_matches_sentinel_value_only() {
        assert!(SessionMarker::matches(Some("1")));
        assert!(!SessionMarker::matches(Some("0")));
        assert!(!SessionMarker::matches(Some("")));
        assert!(!SessionMarker::matches(None));
    }
}
