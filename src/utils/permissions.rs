use crate::error::{SwipeError, Result};
use std::fs;
use tracing::{info, warn};

/// Есть ли у процесса доступ к управлению окнами.
///
/// Запрашивается непосредственно перед действием, без фонового опроса.
pub trait AccessProbe: Send + Sync {
    fn is_granted(&self) -> bool;
}

/// Окнами можно управлять только изнутри графической сессии
#[derive(Debug, Default)]
pub struct SessionAccessProbe;

impl AccessProbe for SessionAccessProbe {
    fn is_granted(&self) -> bool {
        let has_display = |name: &str| std::env::var(name).map_or(false, |v| !v.is_empty());
        // Под sudo kdotool получает окружение пользователя через SUDO_USER
        has_display("DISPLAY") || has_display("WAYLAND_DISPLAY") || std::env::var("SUDO_USER").is_ok()
    }
}

/// В dry-run режиме окна не трогаются, доступ не нужен
#[derive(Debug, Default)]
pub struct DryRunAccessProbe;

impl AccessProbe for DryRunAccessProbe {
    fn is_granted(&self) -> bool {
        true
    }
}

/// Проверить права доступа к необходимым ресурсам
pub fn check_permissions() -> Result<()> {
    info!("Проверка прав доступа...");

    // Проверка доступа к /dev/input/
    check_input_devices_access()?;

    if !SessionAccessProbe.is_granted() {
        warn!("Не найдена графическая сессия (DISPLAY/WAYLAND_DISPLAY) - окна сворачиваться не будут");
    }

    check_not_root();

    info!("Проверка прав доступа завершена успешно");
    Ok(())
}

fn check_input_devices_access() -> Result<()> {
    let input_dir = "/dev/input";

    if !std::path::Path::new(input_dir).exists() {
        return Err(SwipeError::Permission(format!(
            "Директория {} не существует",
            input_dir
        )));
    }

    // Проверяем возможность чтения директории
    match fs::read_dir(input_dir) {
        Ok(_) => {
            info!("Доступ к {} подтвержден", input_dir);
            Ok(())
        }
        Err(e) => Err(SwipeError::Permission(format!(
            "Нет доступа к {}: {}. Добавьте пользователя в группу 'input'",
            input_dir, e
        ))),
    }
}

fn check_not_root() {
    match std::env::var("USER") {
        Ok(user) if user == "root" => {
            warn!("⚠️  Приложение запущено от имени root!");
            warn!("   Утилиты управления окнами будут запускаться от имени SUDO_USER");
            warn!("   Рекомендуется добавить пользователя в группу 'input'");
            warn!("   и запускать приложение от имени обычного пользователя:");
            warn!("   sudo usermod -a -G input $USER");
            warn!("   (затем перезайдите в систему)");
        }
        Ok(user) => {
            info!("Приложение запущено от имени пользователя: {}", user);
        }
        Err(_) => {
            warn!("Не удалось определить пользователя");
        }
    }
}

/// Получить рекомендуемые команды для настройки окружения
pub fn get_setup_commands() -> Vec<String> {
    vec![
        "# Добавить пользователя в группу input (чтение тачпада):".to_string(),
        "sudo usermod -a -G input $USER".to_string(),
        "".to_string(),
        "# Установить утилиту управления окнами (X11 или KDE Wayland):".to_string(),
        "sudo apt install xdotool    # или: cargo install kdotool".to_string(),
        "".to_string(),
        "# После выполнения команд перезайдите в систему".to_string(),
    ]
}
