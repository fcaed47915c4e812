use crate::config::Config;
use crate::error::{SwipeError, Result};
use crate::services::GestureEngine;
use crate::swipe_error;
use crate::utils::DeviceFinder;
use evdev::Device;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{error, info, warn};

use super::r#trait::TouchpadListenerTrait;
use super::slot_tracker::SlotTracker;

/// Пауза после ошибки чтения, чтобы не крутить цикл вхолостую
const READ_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// errno ENODEV: устройство исчезло (например, отключён bluetooth тачпад)
const ENODEV: i32 = 19;

struct TouchpadSource {
    path: PathBuf,
    device: Device,
    tracker: SlotTracker,
}

pub struct RealTouchpadListener {
    engine: Arc<GestureEngine>,
    sources: Vec<TouchpadSource>,
}

impl RealTouchpadListener {
    pub fn new(config: Arc<Config>, engine: Arc<GestureEngine>) -> Result<Self> {
        info!("Инициализация RealTouchpadListener");

        let paths = DeviceFinder::find_touchpad_devices(&config.input.device_path)?;
        let mut sources = Vec::with_capacity(paths.len());

        for path in paths {
            match Self::open_source(&path) {
                Ok(source) => sources.push(source),
                Err(e) => warn!("Тачпад {:?} пропущен: {}", path, e),
            }
        }

        if sources.is_empty() {
            return Err(SwipeError::SensorUnavailable(
                "не удалось открыть ни одного multitouch тачпада".to_string(),
            ));
        }

        Ok(Self { engine, sources })
    }

    fn open_source(path: &Path) -> Result<TouchpadSource> {
        let device = Device::open(path)
            .map_err(|e| swipe_error!(device_not_found, "Не удалось открыть устройство {:?}: {}", path, e))?;

        if !DeviceFinder::has_touchpad_capabilities(&device) {
            return Err(swipe_error!(
                sensor_unavailable,
                "{:?} не поддерживает multitouch протокол B",
                path
            ));
        }

        let tracker = SlotTracker::from_device(&device)?;
        Self::log_opened_device(path, &device);

        // Устройство не захватывается: курсор и жесты окружения продолжают работать
        Ok(TouchpadSource {
            path: path.to_path_buf(),
            device,
            tracker,
        })
    }

    async fn run_impl(self) -> Result<()> {
        info!(
            "RealTouchpadListener запущен, читаем {} тачпад(ов)",
            self.sources.len()
        );

        let engine = self.engine;
        let mut finished = spawn_readers(self.sources, move |source| {
            Self::read_loop(source, Arc::clone(&engine))
        })?;

        // None: все потоки чтения завершились (устройства отключены)
        while finished.recv().await.is_some() {}
        warn!("Все тачпады отключены, распознавание жестов остановлено");

        Ok(())
    }

    /// Блокирующий цикл чтения одного устройства. Кадры одного устройства
    /// обрабатываются строго последовательно.
    fn read_loop(mut source: TouchpadSource, engine: Arc<GestureEngine>) {
        info!("Чтение событий тачпада '{}' ({:?})", source.tracker.device(), source.path);

        loop {
            let events = match source.device.fetch_events() {
                Ok(events) => events.collect::<Vec<_>>(),
                Err(e) if e.raw_os_error() == Some(ENODEV) => {
                    warn!("Тачпад {:?} отключён, чтение остановлено", source.path);
                    return;
                }
                Err(e) => {
                    error!("Ошибка чтения событий {:?}: {}", source.path, e);
                    std::thread::sleep(READ_ERROR_BACKOFF);
                    continue;
                }
            };

            for event in events {
                if let Some(frame) = source.tracker.apply_event(&event) {
                    engine.handle_frame(&frame);
                }
            }
        }
    }

    fn log_opened_device(path: &Path, device: &Device) {
        info!("Тачпад: {}", device.name().unwrap_or("Unknown"));
        info!("Путь: {:?}", path);
        info!("Физический путь: {:?}", device.physical_path());
    }
}

#[async_trait::async_trait]
impl TouchpadListenerTrait for RealTouchpadListener {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}

/// Запустить по потоку ОС на источник.
///
/// read() на устройстве не прерывается, поэтому потоки не принадлежат рантайму
/// tokio: его остановка их не ждёт, они завершаются вместе с процессом.
/// Получатель закрывается, когда завершились все потоки.
fn spawn_readers<S, F>(sources: Vec<S>, read: F) -> Result<UnboundedReceiver<()>>
where
    S: Send + 'static,
    F: Fn(S) + Clone + Send + 'static,
{
    let (done_tx, done_rx) = mpsc::unbounded_channel();

    for (index, source) in sources.into_iter().enumerate() {
        let read = read.clone();
        let done = done_tx.clone();
        std::thread::Builder::new()
            .name(format!("touchpad-reader-{}", index))
            .spawn(move || {
                read(source);
                let _ = done.send(());
            })?;
    }

    Ok(done_rx)
}
