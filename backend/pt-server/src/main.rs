use pt_server::error::{Result as ServerErrorResult, ServerError};
use pt_server::{AppState, build_router, logger};

use pt_auth::{GoogleProvider, IdentityProvider, PasswordHasher, ProviderSettings, TokenIssuer};
use pt_config::Config;
use pt_db::OAuthStateRepository;

use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ServerErrorResult<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path = config.log_file_path()?;
    if let Some(log_dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(log_dir)
            .map_err(|e| ServerError::io(log_dir.display().to_string(), e))?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting pt-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    let pool = pt_db::connect(&database_path).await?;

    info!("Running database migrations...");
    pt_db::migrate(&pool).await?;
    info!("Migrations complete");

    match OAuthStateRepository::new(pool.clone()).purge_expired().await {
        Ok(0) => {}
        Ok(purged) => info!("Purged {} expired OAuth states", purged),
        Err(e) => warn!("Failed to purge expired OAuth states: {}", e),
    }

    // Token signing and password hashing
    let (access_secret, refresh_secret) = config.auth.secrets()?;
    let issuer = Arc::new(TokenIssuer::new(
        access_secret.as_bytes(),
        refresh_secret.as_bytes(),
    ));
    let hasher = PasswordHasher::new(
        config.auth.hash_memory_kib,
        config.auth.hash_iterations,
        config.auth.hash_parallelism,
    )?;

    // Federated sign-in (optional)
    let provider: Option<Arc<dyn IdentityProvider>> = if config.oauth.enabled {
        let (client_id, client_secret) = config.oauth.credentials()?;
        let google = GoogleProvider::new(ProviderSettings {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            auth_url: config.oauth.auth_url.clone(),
            token_url: config.oauth.token_url.clone(),
            userinfo_url: config.oauth.userinfo_url.clone(),
            redirect_url: config.oauth.redirect_url(),
        })?;
        info!("OAuth: Google sign-in enabled");
        Some(Arc::new(google))
    } else {
        info!("OAuth: disabled");
        None
    };

    // Build application state
    let app_state = AppState::new(
        pool.clone(),
        issuer,
        hasher,
        provider,
        config.oauth.success_redirect.clone(),
    );

    // Build router
    let app = build_router(app_state, &config.oauth.callback_path);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ServerError::io(bind_addr.clone(), e))?;

    // Actual bound address (port 0 is auto-assigned)
    let actual_addr = listener
        .local_addr()
        .map_err(|e| ServerError::io(bind_addr.clone(), e))?;
    info!("Server listening on {}", actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::io(actual_addr.to_string(), e))?;

    // Flush the WAL into the main database file before exit
    if let Err(e) = sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
        .execute(&pool)
        .await
    {
        warn!("WAL checkpoint on shutdown failed: {}", e);
    }
    pool.close().await;

    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            // Without a signal handler the server runs until killed
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
