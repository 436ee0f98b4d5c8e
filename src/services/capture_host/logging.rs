use super::r#trait::CaptureHost;
use crate::error::Result;
use crate::events::CaptureSettings;
use tracing::info;

pub struct LoggingHost;

impl LoggingHost {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureHost for LoggingHost {
    fn set_window_target(&mut self, source_name: &str, settings: &CaptureSettings) -> Result<()> {
        info!("Источник '{}' -> {} (без применения)", source_name, settings);
        Ok(())
    }
}
