// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, process::ExitCode, sync::Arc, time::Duration};

use axum_server::Handle;
use donation_auth_server::{
    api::router,
    config::{LogFormat, ServerConfig, DEFAULT_LOG_FILTER},
    profiles::{InMemoryProfileStore, ProfileStore, RecordStoreClient, RestProfileStore},
    state::AppState,
};
use tracing_subscriber::EnvFilter;

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal(handle: Handle<SocketAddr>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);

    let profiles: Arc<dyn ProfileStore> = match &config.record_store {
        Some(store) => {
            let client = match RecordStoreClient::new(store.url.clone(), store.api_key.clone()) {
                Ok(client) => client,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create record store client");
                    return ExitCode::FAILURE;
                }
            };
            tracing::info!(url = %store.url, table = %store.table, "Using hosted record store");
            Arc::new(RestProfileStore::new(client, store.table.clone()))
        }
        None => {
            tracing::warn!("RECORD_STORE_URL not set, profiles are kept in memory");
            Arc::new(InMemoryProfileStore::new())
        }
    };

    tracing::info!(
        audience = %config.auth.audience,
        issuer = %config.auth.issuer(),
        "Bearer tokens are checked for audience, issuer and expiry; signatures are not verified"
    );

    let state = AppState::new(config.auth.clone(), profiles);
    let app = router(state);

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    tracing::info!(addr = %config.bind_addr, "Donation auth server listening (docs at /docs)");
    if let Err(e) = axum_server::bind(config.bind_addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
