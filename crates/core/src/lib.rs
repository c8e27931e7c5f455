mod app_state;
pub use app_state::AppState;
pub mod authentication;
mod environment;
pub use environment::load_env_from_project_path;
mod logger;
pub use logger::{setup_info_logger, setup_logger};
mod startup;
pub use startup::{create_router, start, StartError};
mod yaml;
pub use yaml::{read, ApiConfig, CredentialConfig, ReadYamlError, SetupConfig};

pub use tracing::{error as authgate_error, info as authgate_info};
