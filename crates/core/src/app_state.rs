use std::sync::Arc;

use crate::authentication::AuthGate;

pub struct AppState {
    /// The authentication gate, immutable after startup.
    pub gate: Arc<AuthGate>,
}
