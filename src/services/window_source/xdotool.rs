use super::r#trait::WindowSource;
use crate::capture_error;
use crate::error::{CaptureError, Result};
use crate::events::{WindowHandle, WindowInfo};
use crate::utils::process::ProcessNames;
use std::process::Command;
use tracing::debug;

pub struct XdotoolWindowSource {
    processes: ProcessNames,
}

impl XdotoolWindowSource {
    pub fn new() -> Self {
        Self {
            processes: ProcessNames::new(),
        }
    }

    pub fn test(&self) -> Result<()> {
        let output = Command::new("xdotool").args(["version"]).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(CaptureError::Enumeration("xdotool failed".to_string()))
        }
    }

    fn window_name(&self, handle: WindowHandle) -> Option<String> {
        let output = Command::new("xdotool")
            .args(["getwindowname", &handle.value().to_string()])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).trim_end_matches('\n').to_string())
    }

    fn window_pid(&self, handle: WindowHandle) -> Option<u32> {
        let output = Command::new("xdotool")
            .args(["getwindowpid", &handle.value().to_string()])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        String::from_utf8_lossy(&output.stdout).trim().parse().ok()
    }
}

impl WindowSource for XdotoolWindowSource {
    fn list_windows(&mut self) -> Result<Vec<WindowInfo>> {
        let output = Command::new("xdotool")
            .args(["search", "--onlyvisible", "--name", "."])
            .output()
            .map_err(|e| capture_error!(enumeration, "xdotool не найден: {}", e))?;

        let handles = parse_search_output(
            output.status.success(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )?;

        let mut windows = Vec::with_capacity(handles.len());
        for handle in handles {
            // Окно могло закрыться между search и getwindowname
            let Some(title) = self.window_name(handle) else {
                debug!("xdotool: окно {} исчезло во время опроса", handle);
                continue;
            };

            let window = WindowInfo::new(handle, title);
            windows.push(match self.window_pid(handle) {
                Some(pid) => window.with_pid(pid),
                None => window,
            });
        }

        self.processes.resolve_executables(&mut windows);
        Ok(windows)
    }
}

/// Разбор вывода `xdotool search`: по одному id окна на строку.
/// Код возврата 1 без сообщения в stderr означает, что окон нет.
fn parse_search_output(success: bool, stdout: &str, stderr: &str) -> Result<Vec<WindowHandle>> {
    let stderr = stderr.trim();
    if !success && !stderr.is_empty() {
        return Err(capture_error!(enumeration, "xdotool вернул ошибку: {}", stderr));
    }

    Ok(stdout.lines().filter_map(WindowHandle::parse).collect())
}
