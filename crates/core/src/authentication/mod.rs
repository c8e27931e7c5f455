mod api;
pub use api::{create_auth_routes, StatusResponse};

mod credentials;
pub use credentials::{BasicAuthCredentials, BasicAuthError};

mod gate;
pub use gate::{AuthGate, GateIntent, RequestAuthView};

mod gate_middleware;
pub use gate_middleware::{authentication_gate, Authenticated};

mod session;
pub use session::{SessionMarker, SESSION_COOKIE_NAME};

mod validator;
pub use validator::{CredentialValidator, SingleCredentialValidator};
