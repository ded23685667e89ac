use crate::config::ServerConfig;
use crate::error::Result;
use axum::http::StatusCode;
use axum::{response::IntoResponse, routing::get, Router};
use futures::FutureExt;
use mdb_app::state::AppState;
use tracing::{debug, info};

pub async fn run(args: ServerConfig) -> Result<()> {
    let state = build_state(&args).await?;
    run_with_state(args, state).await
}

pub async fn run_with_state(args: ServerConfig, state: AppState) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    run_graceful_with_state(args, state, shutdown).await
}

pub async fn run_graceful_with_state<S>(
    args: ServerConfig,
    state: AppState,
    shutdown_signal: S,
) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let mut app = main_router(state);

    if args.cors {
        app = app.layer(tower_http::cors::CorsLayer::very_permissive());
    }

    let listener = tokio::net::TcpListener::bind(args.socket_addr()?).await?;
    info!(
        "Listening on {}, public URL {}",
        listener.local_addr()?,
        args.base_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    debug!("Server stopped");
    Ok(())
}

#[cfg(feature = "openapi")]
fn api_docs() -> utoipa::openapi::OpenApi {
    #[derive(utoipa::OpenApi)]
    #[openapi(info(title = "Movie catalog API"))]
    struct OpenApi;

    use utoipa::OpenApi as _;
    OpenApi::openapi().nest("/api", mdb_app::rest_api::api_docs())
}

pub fn main_router(state: AppState) -> Router<()> {
    #[allow(unused_mut)]
    let mut router = Router::new()
        .nest("/api", mdb_app::rest_api::router())
        .with_state(state)
        .route("/health", get(health));

    #[cfg(feature = "openapi")]
    {
        let docs = api_docs();
        router = router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs),
        );
    }
    router
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Prepares data directory and database, runs pending migrations
pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let data_dir = config.backend.ensure_data_dir()?;
    debug!("Using data directory {}", data_dir.display());

    let pool = mdb_dal::new_pool(&config.backend.database_url()).await?;
    mdb_dal::migrate(&pool).await?;

    Ok(AppState::new(pool))
}
