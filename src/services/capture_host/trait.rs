use crate::config::HostConfig;
use crate::error::Result;
use crate::events::CaptureSettings;
use tracing::warn;

use super::command::CommandHost;
use super::logging::LoggingHost;

/// Writes a window target into a capture source of the host application.
pub trait CaptureHost {
    /// Point capture source `source_name` at the window described by `settings`.
    fn set_window_target(&mut self, source_name: &str, settings: &CaptureSettings) -> Result<()>;
}

/// Factory function to create an appropriate capture host based on the dry_run flag
pub fn create_capture_host(config: &HostConfig, dry_run: bool) -> Result<Box<dyn CaptureHost + Send>> {
    if dry_run {
        return Ok(Box::new(LoggingHost::new()));
    }

    if config.command.is_empty() {
        warn!("host.command не задан - изменения источника будут только логироваться");
        return Ok(Box::new(LoggingHost::new()));
    }

    Ok(Box::new(CommandHost::new(config.command.clone())?))
}
