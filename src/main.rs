use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tokio::signal::unix::{signal as unix_signal, SignalKind};
use tracing::{error, info, warn};
mod config;
mod error;
mod events;
mod services;
mod utils;

use config::Config;
use services::{create_touchpad_listener, create_window_action, ActionDispatcher, ActionExecutor, GestureEngine};
use utils::{AccessProbe, DryRunAccessProbe, SessionAccessProbe};

#[derive(Parser, Debug)]
#[command(name = "swipemin")]
#[command(about = "Сворачивает окна активного приложения свайпом тремя пальцами вниз")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "swipemin.toml")]
    config: String,

    /// Режим сухого запуска (эмуляция тачпада, окна не сворачиваются)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию берётся из конфигурации)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Arc::new(Config::load(&args.config)?);

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск swipemin v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    } else if let Err(e) = utils::permissions::check_permissions() {
        error!("{}", e);
        for line in utils::permissions::get_setup_commands() {
            warn!("{}", line);
        }
    }

    // Исполнитель действий с окнами: единственный контекст, который их выполняет
    let window_action = create_window_action(config.clone(), args.dry_run)?;
    let (dispatcher, action_rx) = ActionDispatcher::channel();
    let executor_handle = tokio::spawn(ActionExecutor::new(action_rx, window_action).run());

    let access: Arc<dyn AccessProbe> = if args.dry_run {
        Arc::new(DryRunAccessProbe)
    } else {
        Arc::new(SessionAccessProbe)
    };
    let engine = Arc::new(GestureEngine::new(&config, access, dispatcher));

    // Без тачпада отключается только распознавание жестов, процесс продолжает работу
    let listener_handle = match create_touchpad_listener(config.clone(), engine.clone(), args.dry_run) {
        Ok(listener) => Some(tokio::spawn(async move {
            if let Err(e) = listener.run().await {
                error!("Ошибка в TouchpadListener: {}", e);
            }
        })),
        Err(e) => {
            error!("Распознавание жестов недоступно: {}", e);
            None
        }
    };

    info!("Все сервисы запущены. SIGUSR1 включает/отключает сворачивание");

    // Ожидание сигнала завершения, SIGUSR1 переключает функцию
    let mut toggle = unix_signal(SignalKind::user_defined1())?;
    loop {
        tokio::select! {
            result = signal::ctrl_c() => {
                match result {
                    Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
                    Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
                }
                break;
            }
            _ = toggle.recv() => {
                // Действует до перезапуска, значение по умолчанию - gesture.enabled
                engine.toggle_enabled();
            }
        }
    }

    info!("Завершение работы...");

    // Потоки чтения тачпада - отдельные потоки ОС вне рантайма: остановка
    // рантайма их не ждёт, они завершатся вместе с процессом
    if let Some(handle) = listener_handle {
        handle.abort();
    }
    executor_handle.abort();

    info!("swipemin завершил работу");
    Ok(())
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        "compact" => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    Ok(())
}
