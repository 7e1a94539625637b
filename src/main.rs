use std::sync::Arc;

use onboard::config::ServiceConfig;
use onboard::store::{Database, LibSqlBackend, SessionStore};
use onboard::submit::SampleSubmission;
use onboard::wizard::{OnboardingManager, RouteState, onboarding_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServiceConfig::from_env()?;

    eprintln!("🧭 Onboard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api/onboarding", config.port);
    eprintln!("   Database: {}", config.db_path.display());

    let db: Arc<dyn Database> = Arc::new(
        LibSqlBackend::new_local(&config.db_path)
            .await
            .unwrap_or_else(|e| {
                eprintln!(
                    "Error: Failed to open database at {}: {}",
                    config.db_path.display(),
                    e
                );
                std::process::exit(1);
            }),
    );

    let manager = Arc::new(OnboardingManager::new(SessionStore::new(db)));

    // Resume (or start) the wizard up front so the banner can say where we are
    let status = manager.status().await?;
    match &status.current_step {
        Some(step) => eprintln!("   Session {}: {}\n", status.session_id, step.ticker),
        None => eprintln!("   Session {}: completed\n", status.session_id),
    }

    let submission = SampleSubmission::new(config.submit_delay_cap);
    let app = onboarding_routes(RouteState::new(manager, submission));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Onboarding server started");
    axum::serve(listener, app).await?;

    Ok(())
}
