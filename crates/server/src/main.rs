use std::path::PathBuf;

use authgate_core::start;
use tracing::error;

#[tokio::main]
async fn main() {
    let project_path =
        std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    if let Err(e) = start(&project_path).await {
        error!("Error starting the server: {}", e);
    }
}
