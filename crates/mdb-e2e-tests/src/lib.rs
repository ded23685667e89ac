use std::path::Path;
use std::time::Duration;

use anyhow::{Result, anyhow};
use futures::FutureExt as _;
use mdb_server::config::{Parser, ServerConfig};
use rand::Rng as _;
use tempfile::TempDir;
use tokio::sync::oneshot;
use tracing::{debug, error};

pub mod rest;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

pub fn test_config(test_name: &str, base_dir: &Path) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix_in(format!("{}_", test_name), base_dir)?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?.to_string();
    let base_url = format!("http://127.0.0.1:{}/", port);
    let args = &[
        "mdb-e2e-tests",
        "--data-dir",
        &data_dir,
        "--port",
        &port,
        "--base-url",
        &base_url,
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

/// Config in fresh temporary data directory, with database already migrated,
/// so test can seed data before server starts
pub async fn prepare_env(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let (config, guard) = test_config(test_name, &std::env::temp_dir())?;
    let pool = mdb_dal::new_pool(&config.backend.database_url()).await?;
    mdb_dal::migrate(&pool).await?;
    pool.close().await;
    Ok((config, guard))
}

/// Server stops when guard is dropped
pub struct ServerGuard {
    #[allow(dead_code)]
    stop: oneshot::Sender<()>,
}

pub async fn spawn_server(args: ServerConfig) -> Result<ServerGuard> {
    let health_url = args.base_url.join("health")?;
    let state = mdb_server::build_state(&args).await?;
    let (stop, stopped) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown = stopped.map(|_| ());
        if let Err(e) = mdb_server::run_graceful_with_state(args, state, shutdown).await {
            error!("Server failed: {e}");
        }
    });

    let client = reqwest::Client::new();
    for _ in 0..50 {
        match client.get(health_url.clone()).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Server ready");
                return Ok(ServerGuard { stop });
            }
            _ => tokio::time::sleep(Duration::from_millis(20)).await,
        }
    }
    Err(anyhow!("Server did not start"))
}

/// Starts server over catalog from [`rest::seed_catalog`]
pub async fn launch_env(test_name: &str) -> Result<(reqwest::Url, ServerGuard, ConfigGuard)> {
    let (args, config_guard) = prepare_env(test_name).await?;
    rest::seed_catalog(&args.backend.database_url()).await?;
    let base_url = args.base_url.clone();
    let server_guard = spawn_server(args).await?;
    Ok((base_url, server_guard, config_guard))
}
