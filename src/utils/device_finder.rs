use crate::error::{SwipeError, Result};
use evdev::{AbsoluteAxisCode, KeyCode, PropType};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct DeviceFinder;

impl DeviceFinder {
    /// Найти multitouch тачпады. В режиме "auto" возвращаются все найденные
    pub fn find_touchpad_devices(device_path: &str) -> Result<Vec<PathBuf>> {
        if device_path != "auto" {
            let path = PathBuf::from(device_path);
            return if path.exists() {
                info!("Используется указанное устройство: {:?}", path);
                Ok(vec![path])
            } else {
                SwipeError::device_not_found(format!("Указанное устройство не найдено: {:?}", path))
            };
        }

        Self::auto_find_touchpads()
    }

    fn auto_find_touchpads() -> Result<Vec<PathBuf>> {
        info!("Начинаем автопоиск тачпадов...");

        let input_dir = Path::new("/dev/input");
        let entries = fs::read_dir(input_dir)
            .map_err(|e| SwipeError::Permission(format!("Нет доступа к /dev/input: {}", e)))?;

        let mut event_devices = Vec::new();

        for entry in entries {
            let entry = entry.map_err(SwipeError::Io)?;
            let path = entry.path();
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

            if name.starts_with("event") {
                event_devices.push(path);
            }
        }

        // Сортируем устройства по номеру
        event_devices.sort_by_key(|path| Self::event_number(path));

        let touchpads: Vec<PathBuf> = event_devices
            .into_iter()
            .filter(|path| Self::is_touchpad_device(path))
            .collect();

        if touchpads.is_empty() {
            return SwipeError::device_not_found(
                "Не найдено доступных multitouch тачпадов. \
                 Убедитесь, что пользователь добавлен в группу 'input'",
            );
        }

        info!("Найдено тачпадов: {}", touchpads.len());
        Ok(touchpads)
    }

    fn event_number(path: &Path) -> u32 {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix("event"))
            .and_then(|n| n.parse().ok())
            .unwrap_or(u32::MAX)
    }

    fn is_touchpad_device(device_path: &Path) -> bool {
        match evdev::Device::open(device_path) {
            Ok(device) => {
                let name = device.name().unwrap_or("Unknown").to_string();
                let is_touchpad = Self::has_touchpad_capabilities(&device);

                if is_touchpad {
                    info!("Устройство {:?} подходит как тачпад ({})", device_path, name);
                } else {
                    debug!("Устройство {:?} не является тачпадом ({})", device_path, name);
                }
                is_touchpad
            }
            Err(e) => {
                if e.kind() == std::io::ErrorKind::PermissionDenied {
                    warn!("Устройство {:?} недоступно: {}", device_path, e);
                } else {
                    debug!("Не удалось открыть устройство {:?}: {}", device_path, e);
                }
                false
            }
        }
    }

    /// Multitouch протокол B со слотами, палец как инструмент и указатель
    /// (а не сенсорный экран)
    pub fn has_touchpad_capabilities(device: &evdev::Device) -> bool {
        let has_mt_axes = device.supported_absolute_axes().map_or(false, |axes| {
            axes.contains(AbsoluteAxisCode::ABS_MT_SLOT)
                && axes.contains(AbsoluteAxisCode::ABS_MT_POSITION_X)
                && axes.contains(AbsoluteAxisCode::ABS_MT_POSITION_Y)
                && axes.contains(AbsoluteAxisCode::ABS_MT_TRACKING_ID)
        });

        let has_finger_tool = device
            .supported_keys()
            .map_or(false, |keys| keys.contains(KeyCode::BTN_TOOL_FINGER));

        let is_pointer = device.properties().contains(PropType::POINTER);

        has_mt_axes && has_finger_tool && is_pointer
    }
}
