use super::r#trait::CaptureHost;
use crate::capture_error;
use crate::error::Result;
use crate::events::CaptureSettings;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Сколько ждать внешнюю команду, прежде чем убить её
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const WAIT_STEP: Duration = Duration::from_millis(20);

/// Applies capture settings by running an external command.
///
/// The configured argv is invoked as `<argv...> <source_name> <settings_json>`.
/// A non-zero exit status counts as a failed write, and so does a command
/// that outlives its timeout (it is killed).
pub struct CommandHost {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandHost {
    pub fn new(mut command: Vec<String>) -> Result<Self> {
        if command.is_empty() {
            return Err(capture_error!(internal, "Пустая команда для применения настроек"));
        }
        let program = command.remove(0);
        Ok(Self {
            program,
            args: command,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl CaptureHost for CommandHost {
    fn set_window_target(&mut self, source_name: &str, settings: &CaptureSettings) -> Result<()> {
        let json = settings
            .to_json()
            .map_err(|e| capture_error!(internal, "Не удалось сериализовать настройки: {}", e))?;

        debug!("Запуск {} для источника '{}'", self.program, source_name);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(source_name)
            .arg(&json)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| capture_error!(host_write, "{} не запустился: {}", self.program, e))?;

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if started.elapsed() >= self.timeout => {
                    warn!("{} не завершился за {:?}, останавливаем", self.program, self.timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(capture_error!(
                        host_write,
                        "{} не завершился за {:?}",
                        self.program,
                        self.timeout
                    ));
                }
                Ok(None) => std::thread::sleep(WAIT_STEP),
                Err(e) => {
                    let _ = child.kill();
                    return Err(capture_error!(host_write, "Ожидание {}: {}", self.program, e));
                }
            }
        };

        if !status.success() {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                let _ = pipe.read_to_string(&mut stderr);
            }
            return Err(capture_error!(
                host_write,
                "{} завершился с {}: {}",
                self.program,
                status,
                stderr.trim()
            ));
        }

        Ok(())
    }
}
