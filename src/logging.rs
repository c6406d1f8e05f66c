//! # Structured Logging Module
//!
//! Environment-aware structured logging for classification cycles and
//! alert dispatch, built on `tracing` with console output.

use std::sync::OnceLock;

use chrono::Utc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(EnvFilter::new(log_level)),
        );

        // Use try_init to avoid panic if a global subscriber already exists
        // (e.g. set by an embedding application)
        if subscriber.try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(
            environment = %environment,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    resolve_environment(
        std::env::var("FLEETBOARD_ENV").ok(),
        std::env::var("APP_ENV").ok(),
    )
}

/// Pick the effective environment name: `FLEETBOARD_ENV` wins over
/// `APP_ENV`, falling back to "development".
fn resolve_environment(fleetboard_env: Option<String>, app_env: Option<String>) -> String {
    fleetboard_env
        .or(app_env)
        .unwrap_or_else(|| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "test" => "debug".to_string(),
        "development" => "debug".to_string(),
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for a completed classification cycle
pub fn log_classification(
    zone: &str,
    gateway_health: &str,
    active_jobs: u64,
    active_encoders: u64,
    stale_detected: bool,
) {
    tracing::info!(
        zone = %zone,
        gateway_health = %gateway_health,
        active_jobs = active_jobs,
        active_encoders = active_encoders,
        stale_detected = stale_detected,
        timestamp = %Utc::now().to_rfc3339(),
        "📊 CLASSIFICATION"
    );
}

/// Log structured data for alert dispatch decisions
pub fn log_alert_dispatch(
    previous_zone: Option<&str>,
    current_zone: &str,
    decision: &str,
    details: Option<&str>,
) {
    tracing::info!(
        previous_zone = previous_zone,
        current_zone = %current_zone,
        decision = %decision,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "🚨 ALERT_DISPATCH"
    );
}

/// Log a collaborator fetch failure that was degraded to a safe default
pub fn log_fetch_failure(fetch_group: &str, error: &str) {
    tracing::warn!(
        fetch_group = %fetch_group,
        error = %error,
        timestamp = %Utc::now().to_rfc3339(),
        "⚠️ FETCH_DEGRADED"
    );
}
