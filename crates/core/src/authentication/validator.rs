use super::credentials::BasicAuthCredentials;

/// Strategy for deciding whether a parsed credential pair is acceptable.
///
/// The gate takes this as a capability at construction time, so the
/// default single-credential comparator can be swapped for a multi-user
/// store or an external identity check without touching the gate.
pub trait CredentialValidator: Send + Sync {
    fn validate(&self, candidate: &BasicAuthCredentials) -> bool;
}

/// Validates candidates against the one credential pair configured at
/// startup.
pub struct SingleCredentialValidator {
    username: String,
    password: String,
}

impl SingleCredentialValidator {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl CredentialValidator for SingleCredentialValidator {
    // Both fields compare case-insensitively, the password included.
    fn validate(&self, candidate: &BasicAuthCredentials) -> bool {
        candidate.username.eq_ignore_ascii_case(&self.username)
            && candidate.password.eq_ignore_ascii_case(&self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> SingleCredentialValidator {
        SingleCredentialValidator::new("admin".to_string(), "secret".to_string())
    }

    fn candidate(username: &str, password: &str) -> BasicAuthCredentials {
        BasicAuthCredentials { username: username.to_string(), password: password.to_string() }
    }

    #[test]
    fn test_exact_match() {
        assert!(validator().validate(&candidate("admin", "secret")));
    }

    #[test]
    fn test_match_is_case_insensitive_on_both_fields() {
        assert!(validator().validate(&candidate("Admin", "SECRET")));
        assert!(validator().validate(&candidate("ADMIN", "Secret")));
    }

    #[test]
    fn test_wrong_username_rejected() {
        assert!(!validator().validate(&candidate("root", "secret")));
    }

    #[test]
    fn test_wrong_password_rejected() {
        assert!(!validator().validate(&candidate("admin", "secrets")));
    }
}
