use crate::config::CaptureConfig;
use crate::debug_if_enabled;
use crate::error::{CaptureError, Result};
use crate::events::{CaptureSettings, WindowHandle, WindowInfo};
use crate::services::capture_host::CaptureHost;
use crate::services::window_source::WindowSource;
use regex::Regex;
use tracing::{debug, info, warn};

/// Compiled form of the `[capture]` settings.
#[derive(Debug, Clone)]
pub struct MatchRule {
    source_name: String,
    executable_lower: String,
    title_pattern: Regex,
    retry_count: u32,
}

impl MatchRule {
    pub fn compile(settings: &CaptureConfig) -> Result<Self> {
        if settings.source.trim().is_empty() {
            return CaptureError::invalid_rule("не выбран источник захвата");
        }
        if settings.executable.trim().is_empty() {
            return CaptureError::invalid_rule("не задан исполняемый файл");
        }

        let title_pattern = Regex::new(&settings.window_match).map_err(|e| {
            CaptureError::InvalidRule(format!(
                "регулярное выражение '{}' некорректно: {}",
                settings.window_match, e
            ))
        })?;

        Ok(Self {
            source_name: settings.source.clone(),
            executable_lower: settings.executable.trim().to_lowercase(),
            title_pattern,
            retry_count: settings.retry_count,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Окно принадлежит нужному процессу и в заголовке есть совпадение (поиск, не полное совпадение)
    pub fn matches(&self, window: &WindowInfo) -> bool {
        window.executable_matches(&self.executable_lower)
            && self.title_pattern.is_match(&window.title)
    }
}

/// Первое окно в порядке перечисления, удовлетворяющее правилу.
pub fn select_match<'a>(windows: &'a [WindowInfo], rule: &MatchRule) -> Option<&'a WindowInfo> {
    windows.iter().find(|window| rule.matches(window))
}

/// Что произошло за один тик
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    NotConfigured,
    NoMatch,
    Unchanged(WindowHandle),
    Applied(WindowHandle),
}

/// Matches windows against the active rule and keeps the capture source
/// pointed at the matching window.
///
/// Owns the only mutable state: the active rule and the last window handle
/// that was successfully written to the host.
pub struct WindowMatcher {
    windows: Box<dyn WindowSource + Send>,
    host: Box<dyn CaptureHost + Send>,
    rule: Option<MatchRule>,
    applied: Option<WindowHandle>,
}

impl WindowMatcher {
    pub fn new(windows: Box<dyn WindowSource + Send>, host: Box<dyn CaptureHost + Send>) -> Self {
        Self {
            windows,
            host,
            rule: None,
            applied: None,
        }
    }

    /// Заменяет правило целиком. При ошибке старое правило и applied не меняются.
    pub fn configure(&mut self, settings: &CaptureConfig) -> Result<()> {
        let rule = MatchRule::compile(settings)?;

        info!(
            "Правило: '{}' в окнах '{}' -> источник '{}' (повторов: {})",
            settings.window_match, settings.executable, settings.source, settings.retry_count
        );

        self.rule = Some(rule);
        self.applied = None;
        Ok(())
    }

    #[cfg(test)]
    pub fn applied_target(&self) -> Option<WindowHandle> {
        self.applied
    }

    /// Один проход опроса. Ошибки только логируются, таймер продолжает работу.
    pub fn tick(&mut self) {
        match self.try_tick() {
            Ok(outcome) => {
                debug_if_enabled!("Тик завершён: {:?}", outcome);
            }
            Err(e) => warn!("{}", e),
        }
    }

    pub fn try_tick(&mut self) -> Result<TickOutcome> {
        let Some(rule) = self.rule.as_ref() else {
            debug!("Правило не задано, пропускаем тик");
            return Ok(TickOutcome::NotConfigured);
        };

        let Some(window) = find_window(self.windows.as_mut(), rule)? else {
            return Ok(TickOutcome::NoMatch);
        };

        if self.applied == Some(window.handle) {
            return Ok(TickOutcome::Unchanged(window.handle));
        }

        info!("Найдено окно {}, обновляем источник '{}'", window, rule.source_name());
        let settings = CaptureSettings::for_window(&window);
        self.host.set_window_target(rule.source_name(), &settings)?;

        // Только после подтверждённой записи, иначе повторим на следующем тике
        self.applied = Some(window.handle);
        Ok(TickOutcome::Applied(window.handle))
    }
}

fn find_window(windows: &mut (dyn WindowSource + Send), rule: &MatchRule) -> Result<Option<WindowInfo>> {
    for attempt in 0..=rule.retry_count {
        let listed = windows.list_windows()?;
        debug_if_enabled!("Получено окон: {}", listed.len());

        if let Some(window) = select_match(&listed, rule) {
            return Ok(Some(window.clone()));
        }

        if attempt < rule.retry_count {
            debug!("Подходящее окно не найдено, повтор {}...", attempt + 1);
        }
    }

    debug!(
        "Нет окна '{}' процесса '{}'",
        rule.title_pattern.as_str(),
        rule.executable_lower
    );
    Ok(None)
}
