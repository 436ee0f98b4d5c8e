use super::window::WindowInfo;
use serde::Serialize;
use std::fmt;

/// Настройки, которые записываются в источник захвата окна.
///
/// `window` читает источник `window_capture`, `capture_window` читает
/// `xcomposite_input`. Записываются оба поля, так что тип источника не важен.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureSettings {
    pub window: String,
    pub capture_window: String,
}

impl CaptureSettings {
    pub fn for_window(window: &WindowInfo) -> Self {
        Self {
            window: format!("{}:{}", window.title, window.executable),
            capture_window: format!(
                "{}\r\n{}\r\n{}",
                window.handle.value(),
                window.title,
                window.executable
            ),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for CaptureSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window={:?}", self.window)
    }
}
