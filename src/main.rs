use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info, warn};
mod config;
mod error;
mod events;
mod services;
mod utils;

use config::Config;
use services::create_capture_service;

#[derive(Parser, Debug)]
#[command(name = "dynamic-window-capture")]
#[command(about = "Держит источник захвата окна направленным на окно с динамическим заголовком")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "capture.toml")]
    config: PathBuf,

    /// Режим сухого запуска (эмуляция окон, без изменения источника)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Config::load(&args.config)?;

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск dynamic-window-capture v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {:?}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - источник захвата не изменяется");
    } else {
        utils::session::check_session();
    }

    let capture_service = create_capture_service(config, args.config.clone(), args.dry_run)?;

    let capture_handle = tokio::spawn(async move {
        if let Err(e) = capture_service.run().await {
            error!("Ошибка в CaptureService: {}", e);
        }
    });

    info!("Сервис запущен, SIGHUP перечитывает конфигурацию");

    // Ожидание сигнала завершения
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Получен сигнал завершения (Ctrl+C)");
        }
        Err(err) => {
            error!("Ошибка при ожидании сигнала завершения: {}", err);
        }
    }

    info!("Завершение работы...");

    capture_handle.abort();
    let _ = capture_handle.await;

    info!("dynamic-window-capture завершил работу");
    Ok(())
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if format == "full" {
        registry.with(tracing_subscriber::fmt::layer()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }

    Ok(())
}
