// src/main.rs

mod config;
mod db;
mod error;
mod models;
mod services;
mod state;
mod templates;
mod web;

use crate::{config::Config, state::AppState};
use axum::serve;
use std::net::SocketAddr;
use time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::Key, Expiry, ExpiredDeletion, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Logging ---
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "leaonegro=debug,tower_http=info,sqlx=warn,tower_sessions=info".into()
        }))
        .with(fmt::layer())
        .init();

    tracing::info!("🦁 Iniciando o site do Leão Negro FC...");

    // --- Configuração (só do ambiente, nada embutido) ---
    let config = Config::from_env()
        .map_err(|e| anyhow::anyhow!("Configuração incompleta: {e}"))?;
    if config.session_secret.len() < 64 {
        anyhow::bail!("SESSION_SECRET deve ter pelo menos 64 bytes.");
    }

    // --- Base de dados ---
    let db_pool = db::create_db_pool(&config.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Falha ao conectar/migrar a base de dados: {e}"))?;

    // --- Sessões (guardadas no mesmo SQLite, cookie assinada) ---
    let session_store = SqliteStore::new(db_pool.clone())
        .with_table_name("sessions")
        .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {e}"))?;
    session_store.migrate().await?;

    let sweeper_store = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = sweeper_store
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Erro na limpeza de sessões expiradas: {:?}", e);
        }
    });

    let key = Key::from(config.session_secret.as_bytes());
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_signed(key);

    // --- Estado partilhado e router ---
    let app_state = AppState {
        db_pool,
        config: config.clone(),
    };
    let app = web::routes::create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer),
    );

    // --- Servidor ---
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("📡 A escutar em http://{}", addr);
    let listener = TcpListener::bind(addr).await?;

    serve(listener, app.into_make_service()).await?;
    Ok(())
}
