use super::r#trait::WindowSource;
use crate::capture_error;
use crate::error::{CaptureError, Result};
use crate::events::{WindowHandle, WindowInfo};
use crate::trace_if_enabled;
use crate::utils::process::ProcessNames;
use std::process::Command;

pub struct WmctrlWindowSource {
    processes: ProcessNames,
}

impl WmctrlWindowSource {
    pub fn new() -> Self {
        Self {
            processes: ProcessNames::new(),
        }
    }

    pub fn test(&self) -> Result<()> {
        let output = Command::new("wmctrl").args(["-l"]).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(CaptureError::Enumeration("wmctrl failed".to_string()))
        }
    }
}

impl WindowSource for WmctrlWindowSource {
    fn list_windows(&mut self) -> Result<Vec<WindowInfo>> {
        let output = Command::new("wmctrl")
            .args(["-l", "-p"])
            .output()
            .map_err(|e| capture_error!(enumeration, "wmctrl не найден: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(capture_error!(enumeration, "wmctrl вернул ошибку: {}", stderr.trim()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut windows: Vec<WindowInfo> = stdout
            .lines()
            .filter_map(parse_wmctrl_line)
            .map(|line| {
                let window = WindowInfo::new(line.handle, line.title.to_string());
                match line.pid {
                    Some(pid) => window.with_pid(pid),
                    None => window,
                }
            })
            .collect();

        self.processes.resolve_executables(&mut windows);
        for window in &windows {
            trace_if_enabled!("wmctrl: {}", window);
        }

        Ok(windows)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct WmctrlLine<'a> {
    handle: WindowHandle,
    pid: Option<u32>,
    title: &'a str,
}

/// Разбор строки `wmctrl -lp`: `<id> <desktop> <pid> <host> <title...>`.
/// Заголовок берётся как есть, внутренние пробелы сохраняются.
fn parse_wmctrl_line(line: &str) -> Option<WmctrlLine<'_>> {
    let (id, rest) = next_field(line)?;
    let (_desktop, rest) = next_field(rest)?;
    let (pid, rest) = next_field(rest)?;
    let handle = WindowHandle::parse(id)?;

    // У окон без _NET_WM_PID wmctrl печатает 0
    let pid = pid.parse::<u32>().ok().filter(|pid| *pid != 0);

    let title = match next_field(rest) {
        Some((_host, title)) => title,
        None => "",
    };

    Some(WmctrlLine { handle, pid, title })
}

fn next_field(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], input[end..].trim_start())),
        None => Some((input, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_regular_line() {
        let line = "0x03c00003  0 4242   laptop WhatsApp — Ongoing video call";
        let parsed = parse_wmctrl_line(line).unwrap();

        assert_eq!(parsed.handle, WindowHandle(0x03c0_0003));
        assert_eq!(parsed.pid, Some(4242));
        assert_eq!(parsed.title, "WhatsApp — Ongoing video call");
    }

    #[test]
    fn test_parse_sticky_window_without_pid() {
        let line = "0x01e00007 -1 0      laptop Desktop";
        let parsed = parse_wmctrl_line(line).unwrap();

        assert_eq!(parsed.pid, None);
        assert_eq!(parsed.title, "Desktop");
    }

    #[test]
    fn test_parse_keeps_inner_spaces() {
        let line = "0x00000010  1 99 host a  b   c";
        let parsed = parse_wmctrl_line(line).unwrap();
        assert_eq!(parsed.title, "a  b   c");
    }

    #[test]
    fn test_parse_missing_title() {
        let parsed = parse_wmctrl_line("0x00000010  1 99 host").unwrap();
        assert_eq!(parsed.title, "");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_wmctrl_line("").is_none());
        assert!(parse_wmctrl_line("not-a-window 0 1 host title").is_none());
        assert!(parse_wmctrl_line("0x10").is_none());
    }
}
