use std::{net::SocketAddr, path::Path, sync::Arc, time::Instant};

use axum::{
    body::Body,
    http::{HeaderValue, Request, StatusCode},
    middleware,
    middleware::Next,
    response::Response,
    routing::get,
    Json, Router,
};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, info};

use crate::app_state::AppState;
use crate::authentication::{
    authentication_gate, create_auth_routes, AuthGate, SingleCredentialValidator,
};
use crate::yaml::{read, ApiConfig, ReadYamlError, SetupConfig};
use crate::{load_env_from_project_path, setup_info_logger};

#[derive(Error, Debug)]
pub enum StartError {
    #[error("Failed to find the yaml file")]
    NoYamlFileFound,

    #[error("{0}")]
    ReadYamlError(#[from] ReadYamlError),

    #[error("Failed to start the API: {0}")]
    ApiStartupError(#[from] std::io::Error),
}

/// Health check endpoint
async fn health_check() -> Json<String> {
    Json("healthy".to_string())
}

/// Logs every request with its response status and timing.
async fn activity_logger(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let duration = start.elapsed();

    if status.is_client_error() || status.is_server_error() {
        error!("{} {} responded with {} after {:?}", method, uri, status, duration);
    } else {
        info!("{} {} responded with {} after {:?}", method, uri, status, duration);
    }

    Ok(response)
}

fn cors_layer(api_config: &ApiConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(
            if api_config.allowed_origins.as_ref().is_none_or(|origins| origins.is_empty()) {
                AllowOrigin::any()
            } else {
                AllowOrigin::list(
                    api_config
                        .allowed_origins
                        .clone()
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|origin| HeaderValue::from_str(&origin).ok())
                        .collect::<Vec<HeaderValue>>(),
                )
            },
        )
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Builds the application router with the gate wrapped around every route
/// except the health probe, which liveness checks hit without credentials.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/auth", create_auth_routes())
        .layer(middleware::from_fn_with_state(state.clone(), authentication_gate))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn start_api(config: SetupConfig) -> Result<(), StartError> {
    let validator = Arc::new(SingleCredentialValidator::new(
        config.credential.username.clone(),
        config.credential.password.clone(),
    ));
    let gate = Arc::new(AuthGate::new(config.realm.clone(), validator));
    let state = Arc::new(AppState { gate });

    let app = create_router(state)
        .layer(middleware::from_fn(activity_logger))
        .layer(cors_layer(&config.api_config))
        .into_make_service_with_connect_info::<SocketAddr>();

    let address = format!(
        "{}:{}",
        config.api_config.host.clone().unwrap_or("localhost".to_string()),
        config.api_config.port
    );

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("authgate is up on http://{}", address);
    axum::serve(listener, app).await?;

    Ok(())
}

pub async fn start(project_path: &Path) -> Result<(), StartError> {
    setup_info_logger();
    load_env_from_project_path(project_path);

    info!("Starting up the server");

    let yaml_path = project_path.join("authgate.yaml");
    if !yaml_path.exists() {
        error!("Could not find authgate.yaml in {}", project_path.display());
        return Err(StartError::NoYamlFileFound);
    }

    let config = read(&yaml_path, false)?;

    start_api(config).await
}
