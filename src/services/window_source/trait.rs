use crate::error::Result;
use crate::events::WindowInfo;
use tracing::{info, warn};

use super::dry_run::DryRunWindowSource;
use super::wmctrl::WmctrlWindowSource;
use super::xdotool::XdotoolWindowSource;

/// Source of the current list of open top-level windows.
///
/// Every call produces a fresh snapshot; callers consume it within one tick
/// and never cache it.
pub trait WindowSource {
    fn list_windows(&mut self) -> Result<Vec<WindowInfo>>;
}

/// Factory function to create an appropriate window source based on the dry_run flag
pub fn create_window_source(dry_run: bool) -> Box<dyn WindowSource + Send> {
    if dry_run {
        return Box::new(DryRunWindowSource::new());
    }

    info!("Определяем рабочий метод получения списка окон...");

    let wmctrl = WmctrlWindowSource::new();
    if wmctrl.test().is_ok() {
        info!("Используем wmctrl");
        return Box::new(wmctrl);
    }

    let xdotool = XdotoolWindowSource::new();
    if xdotool.test().is_ok() {
        info!("Используем xdotool");
        return Box::new(xdotool);
    }

    // Ошибки будут логироваться на каждом тике, пока wmctrl не станет доступен
    warn!("Ни wmctrl, ни xdotool не работают, продолжаем с wmctrl");
    Box::new(wmctrl)
}
