use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    X11,
    Wayland,
    Unknown,
}

/// Определяет тип графической сессии по переменным окружения
pub fn detect_session(session_type: Option<&str>, wayland_display: Option<&str>) -> SessionType {
    match session_type.map(str::to_lowercase).as_deref() {
        Some("x11") => return SessionType::X11,
        Some("wayland") => return SessionType::Wayland,
        _ => {}
    }

    if wayland_display.is_some_and(|display| !display.is_empty()) {
        return SessionType::Wayland;
    }

    SessionType::Unknown
}

/// Проверить, что окна вообще можно перечислить из этой сессии
pub fn check_session() {
    let session_type = std::env::var("XDG_SESSION_TYPE").ok();
    let wayland_display = std::env::var("WAYLAND_DISPLAY").ok();
    let session = detect_session(session_type.as_deref(), wayland_display.as_deref());
    info!("Графическая сессия: {:?}", session);

    if session == SessionType::Wayland {
        warn!("Сессия Wayland: wmctrl и xdotool видят только окна XWayland");
    }

    match std::env::var("DISPLAY") {
        Ok(value) if !value.is_empty() => info!("DISPLAY={}", value),
        _ => warn!("DISPLAY не задан, список окон получить не удастся"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_type_wins() {
        assert_eq!(detect_session(Some("x11"), Some("wayland-0")), SessionType::X11);
        assert_eq!(detect_session(Some("Wayland"), None), SessionType::Wayland);
    }

    #[test]
    fn test_wayland_display_fallback() {
        assert_eq!(detect_session(None, Some("wayland-0")), SessionType::Wayland);
        assert_eq!(detect_session(Some("tty"), Some("")), SessionType::Unknown);
        assert_eq!(detect_session(None, None), SessionType::Unknown);
    }

    #[test]
    fn test_check_session_only_logs() {
        check_session();
    }
}
