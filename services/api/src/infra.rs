use chrono::{DateTime, Local, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use td_careers::careers::{HttpWebhook, LandingPage, LandingSources};
use td_careers::config::AppConfig;
use td_careers::error::AppError;
use td_careers::telemetry::{self, LogSink};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn landing_page(config: &AppConfig) -> LandingPage<HttpWebhook> {
    let sources = LandingSources::from_config(&config.nocodb);
    let webhook = HttpWebhook::from_config(&config.webhook);
    LandingPage::new(sources, Arc::new(webhook))
}

/// Load configuration for a one-shot command. Logs go to stderr so the
/// command output stays clean.
pub(crate) fn cli_landing_page() -> Result<LandingPage<HttpWebhook>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment, LogSink::Stderr)?;
    Ok(landing_page(&config))
}

/// Local wall-clock time as printed by the CLI.
pub(crate) fn format_local(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
