use crate::config::Config;
use crate::error::Result;
use crate::services::capture_host::create_capture_host;
use crate::services::matcher::WindowMatcher;
use crate::services::window_source::create_window_source;
use std::path::PathBuf;
use tracing::warn;

use super::capture_service::CaptureService;

/// Trait for the periodic capture driver
#[async_trait::async_trait]
pub trait CaptureServiceTrait {
    /// Run the polling loop until the task is cancelled
    async fn run(self: Box<Self>) -> Result<()>;
}

/// Factory function wiring window source, capture host and matcher based on the dry_run flag
pub fn create_capture_service(
    config: Config,
    config_path: PathBuf,
    dry_run: bool,
) -> Result<Box<dyn CaptureServiceTrait + Send>> {
    let windows = create_window_source(dry_run);
    let host = create_capture_host(&config.host, dry_run)?;
    let mut matcher = WindowMatcher::new(windows, host);

    // Без правила сервис просто ждёт перезагрузки конфигурации (SIGHUP)
    if let Err(e) = matcher.configure(&config.capture) {
        warn!("{}. Источник не будет обновляться до исправления конфигурации", e);
    }

    Ok(Box::new(CaptureService::new(config, config_path, matcher)))
}
