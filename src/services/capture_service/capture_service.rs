use crate::config::Config;
use crate::error::Result;
use crate::services::matcher::WindowMatcher;
use std::path::PathBuf;
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::{interval, Duration, Interval, MissedTickBehavior};
use tracing::{info, warn};

use super::r#trait::CaptureServiceTrait;

pub struct CaptureService {
    config: Config,
    config_path: PathBuf,
    matcher: WindowMatcher,
}

impl CaptureService {
    pub fn new(config: Config, config_path: PathBuf, matcher: WindowMatcher) -> Self {
        Self {
            config,
            config_path,
            matcher,
        }
    }

    fn polling_interval(&self) -> Interval {
        let mut interval = interval(Duration::from_millis(self.config.polling.interval_ms));
        // Тики никогда не накладываются и не догоняют пропущенные
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    pub async fn run(mut self) -> Result<()> {
        info!(
            "CaptureService запущен, интервал опроса {} мс",
            self.config.polling.interval_ms
        );

        let mut interval = self.polling_interval();
        let mut hangup = signal(SignalKind::hangup())?;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.matcher.tick();
                }
                Some(()) = hangup.recv() => {
                    info!("Получен SIGHUP, перечитываем {:?}", self.config_path);
                    if self.reload() {
                        interval = self.polling_interval();
                    }
                }
            }
        }
    }

    /// Перечитывает конфигурацию. Возвращает true, если изменился интервал опроса.
    fn reload(&mut self) -> bool {
        let new_config = match Config::load(&self.config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Конфигурация не применена, остаётся прежняя: {:#}", e);
                return false;
            }
        };

        // Конфигурация применяется целиком или не применяется вовсе
        if let Err(e) = self.matcher.configure(&new_config.capture) {
            warn!("{}. Остаётся прежняя конфигурация", e);
            return false;
        }
        self.config.capture = new_config.capture;

        if new_config.host.command != self.config.host.command {
            warn!("Изменение host.command вступит в силу после перезапуска");
        }

        let interval_changed = new_config.polling.interval_ms != self.config.polling.interval_ms;
        if interval_changed {
            info!(
                "Интервал опроса: {} -> {} мс",
                self.config.polling.interval_ms, new_config.polling.interval_ms
            );
        }

        self.config.polling = new_config.polling;
        interval_changed
    }
}

impl Drop for CaptureService {
    fn drop(&mut self) {
        info!("CaptureService завершает работу");
    }
}

#[async_trait::async_trait]
impl CaptureServiceTrait for CaptureService {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WindowHandle;
    use crate::services::test_utils::{window, RecordingHost, ScriptedWindows};
    use std::io::Write;

    const VALID: &str = r#"
        [capture]
        source = "Capture1"
        executable = "whatsapp.exe"
        window_match = "video call"

        [polling]
        interval_ms = 1000
    "#;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn rewrite(file: &tempfile::NamedTempFile, contents: &str) {
        std::fs::write(file.path(), contents).unwrap();
    }

    fn service(file: &tempfile::NamedTempFile, windows: ScriptedWindows, host: RecordingHost) -> CaptureService {
        let config = Config::load(file.path()).unwrap();
        let mut matcher = WindowMatcher::new(Box::new(windows), Box::new(host));
        matcher.configure(&config.capture).unwrap();
        CaptureService::new(config, file.path().to_path_buf(), matcher)
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_survives_failures_and_applies_once() {
        let file = config_file(VALID);
        let host = RecordingHost::new();
        let windows = ScriptedWindows::new(vec![
            Err("display is gone"),
            Ok(vec![window(2, "whatsapp.exe", "Ongoing video call")]),
        ]);
        let calls = windows.calls();
        let service = service(&file, windows, host.clone());

        let result = tokio::time::timeout(Duration::from_millis(3500), service.run()).await;
        assert!(result.is_err(), "run() must keep polling until cancelled");

        assert_eq!(calls.load(), 4);
        let writes = host.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, "Capture1");
    }

    #[test]
    fn test_reload_applies_new_rule_and_interval() {
        let file = config_file(VALID);
        let host = RecordingHost::new();
        let windows = ScriptedWindows::repeating(vec![
            window(2, "whatsapp.exe", "Ongoing video call"),
            window(3, "zoom", "Zoom Meeting"),
        ]);
        let mut service = service(&file, windows, host.clone());

        service.matcher.tick();
        assert_eq!(service.matcher.applied_target(), Some(WindowHandle(2)));

        rewrite(
            &file,
            r#"
            [capture]
            source = "Capture1"
            executable = "zoom"
            window_match = "Meeting"

            [polling]
            interval_ms = 250
            "#,
        );

        assert!(service.reload());
        assert_eq!(service.config.polling.interval_ms, 250);
        assert_eq!(service.matcher.applied_target(), None);

        service.matcher.tick();
        assert_eq!(service.matcher.applied_target(), Some(WindowHandle(3)));
        assert_eq!(host.writes().len(), 2);
    }

    #[test]
    fn test_reload_with_broken_file_keeps_previous() {
        let file = config_file(VALID);
        let host = RecordingHost::new();
        let windows = ScriptedWindows::repeating(vec![window(2, "whatsapp.exe", "Ongoing video call")]);
        let mut service = service(&file, windows, host.clone());
        service.matcher.tick();

        rewrite(&file, "[polling]\ninterval_ms = 10\n");
        assert!(!service.reload());
        assert_eq!(service.config.polling.interval_ms, 1000);
        assert_eq!(service.matcher.applied_target(), Some(WindowHandle(2)));

        rewrite(
            &file,
            r#"
            [capture]
            source = "Capture1"
            executable = "whatsapp.exe"
            window_match = "video (call"
            "#,
        );
        assert!(!service.reload());
        assert_eq!(service.matcher.applied_target(), Some(WindowHandle(2)));
        assert_eq!(service.config.capture.window_match, "video call");

        service.matcher.tick();
        assert_eq!(host.writes().len(), 1);
    }

    #[test]
    fn test_reload_with_bad_rule_keeps_previous_interval() {
        let file = config_file(VALID);
        let host = RecordingHost::new();
        let windows = ScriptedWindows::repeating(vec![window(2, "whatsapp.exe", "Ongoing video call")]);
        let mut service = service(&file, windows, host.clone());
        service.matcher.tick();

        rewrite(
            &file,
            r#"
            [capture]
            source = "Capture1"
            executable = "whatsapp.exe"
            window_match = "video (call"

            [polling]
            interval_ms = 250
            "#,
        );

        assert!(!service.reload());
        assert_eq!(service.config.polling.interval_ms, 1000);
        assert_eq!(service.config.capture.window_match, "video call");
        assert_eq!(service.matcher.applied_target(), Some(WindowHandle(2)));
    }
}
