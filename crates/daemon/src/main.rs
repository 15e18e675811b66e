// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `paylensd` entrypoint: wire up the store, gateway and listener, then
//! serve until interrupted.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::UnixListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use paylens_core::clock::SystemClock;
use paylens_daemon::env;
use paylens_daemon::{Ctx, Listener};
use paylens_gateway::{GatewayError, HttpGateway};
use paylens_storage::{Store, StoreError};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Env(#[from] env::EnvError),
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let state_dir = env::state_dir()?;
    fs::create_dir_all(&state_dir)?;

    let store = Arc::new(Store::open(state_dir.join("state.json"))?);
    let gateway = Arc::new(HttpGateway::new(&env::api_base()?)?);
    let ctx = Ctx::new(gateway, store, Arc::new(SystemClock));

    let socket_path = env::socket_path(&state_dir);
    remove_stale_socket(&socket_path)?;
    let unix = UnixListener::bind(&socket_path)?;
    info!(socket = %socket_path.display(), "paylensd listening");

    let listener = Listener::new(unix, ctx);
    tokio::select! {
        () = listener.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
        }
    }

    let _ = fs::remove_file(&socket_path);
    Ok(())
}

/// A socket file left by a previous run would make bind fail.
fn remove_stale_socket(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
