use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Верхняя граница retry_count (как в панели настроек хоста)
pub const MAX_RETRY_COUNT: u32 = 50;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub host: HostConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Поля, которые пользователь задаёт для правила сопоставления окна.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CaptureConfig {
    /// Имя источника захвата окна в хосте
    #[serde(default)]
    pub source: String,
    /// Имя исполняемого файла, например whatsapp.exe
    #[serde(default)]
    pub executable: String,
    /// Регулярное выражение для заголовка, например `.*video call`
    #[serde(default)]
    pub window_match: String,
    /// Сколько раз повторить поиск окна в пределах одного тика
    #[serde(default)]
    pub retry_count: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HostConfig {
    /// Команда, которая применяет настройки к источнику захвата.
    /// К аргументам добавляются имя источника и JSON с настройками.
    #[serde(default)]
    pub command: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

impl Config {
    /// Файл, поверх него переменные окружения `DWC_<СЕКЦИЯ>__<ПОЛЕ>`
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        Self::load_with_env(config_path.as_ref(), Env::prefixed("DWC_"))
    }

    fn load_with_env(config_path: &Path, env: Env) -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(env.split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "full" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        if self.polling.interval_ms < 100 {
            anyhow::bail!("polling.interval_ms должно быть минимум 100");
        }

        if self.capture.retry_count > MAX_RETRY_COUNT {
            anyhow::bail!(
                "capture.retry_count должно быть не больше {}",
                MAX_RETRY_COUNT
            );
        }

        if let Some(program) = self.host.command.first() {
            if program.trim().is_empty() {
                anyhow::bail!("Пустое имя программы в host.command");
            }
        }

        Ok(())
    }
}
