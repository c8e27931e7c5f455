use std::path::Path;

use dotenvy::{dotenv, from_path};

/// Loads environment variables for the gate process.
///
/// A `.env` beside the project's `authgate.yaml` wins; when none is
/// readable there, dotenvy falls back to the working directory and the
/// ambient environment.
pub fn load_env_from_project_path(project_path: &Path) {
    let project_env = project_path.join(".env");
    if from_path(&project_env).is_err() {
        dotenv().ok();
    }
}
