use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

const BASIC_SCHEME: &str = "Basic";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BasicAuthError {
    #[error("Missing Authorization header")]
    MissingAuthHeader,
    #[error("Authorization scheme is not Basic")]
    UnsupportedScheme,
    #[error("Invalid base64 encoding")]
    InvalidBase64,
    #[error("Invalid credentials format")]
    InvalidCredentialsFormat,
    #[error("Username or password is empty")]
    EmptyCredential,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuthCredentials {
    pub username: String,
    pub password: String,
}

impl BasicAuthCredentials {
    /// Parses a raw `Authorization` header value into a credential pair.
    ///
    /// The scheme token is matched case-insensitively, the payload is
    /// base64 decoded into UTF-8 and split on `:`. A payload with more
    /// than one colon is rejected outright rather than treated as a
    /// password that contains a colon.
    ///
    /// Pure function of its input; the header value is untrusted.
    pub fn parse(raw_header: Option<&str>) -> Result<Self, BasicAuthError> {
        let raw_header = match raw_header {
            Some(value) if !value.is_empty() => value,
            _ => return Err(BasicAuthError::MissingAuthHeader),
        };

        let (scheme, payload) = raw_header.split_once(' ').unwrap_or((raw_header, ""));
        if !scheme.eq_ignore_ascii_case(BASIC_SCHEME) {
            return Err(BasicAuthError::UnsupportedScheme);
        }

        let decoded = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|_| BasicAuthError::InvalidBase64)?;
        let pair = String::from_utf8(decoded).map_err(|_| BasicAuthError::InvalidBase64)?;

        let parts: Vec<&str> = pair.split(':').collect();
        if parts.len() != 2 {
            return Err(BasicAuthError::InvalidCredentialsFormat);
        }

        if parts[0].is_empty() || parts[1].is_empty() {
            return Err(BasicAuthError::EmptyCredential);
        }

        Ok(BasicAuthCredentials { username: parts[0].to_string(), password: parts[1].to_string() })
    }
}
