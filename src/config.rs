use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// "auto" или путь к /dev/input/eventN
    pub device_path: String,
}

/// Геометрия жеста намеренно не настраивается: здесь только флаг включения
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GestureConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub method: String,
    pub minimize_pause_ms: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            device_path: "auto".to_string(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            method: "auto".to_string(),
            minimize_pause_ms: 50,
        }
    }
}

impl WindowConfig {
    pub fn minimize_pause(&self) -> Duration {
        Duration::from_millis(self.minimize_pause_ms)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("SWIPEMIN_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        if self.input.device_path.is_empty() {
            anyhow::bail!("device_path не может быть пустым (используйте \"auto\")");
        }

        // Валидация настроек окон
        match self.window.method.as_str() {
            "auto" | "xdotool" | "kdotool" => {}
            _ => anyhow::bail!("Неверный метод управления окнами: {}", self.window.method),
        }

        if self.window.minimize_pause_ms > 1000 {
            anyhow::bail!("minimize_pause_ms должно быть не больше 1000");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.gesture.enabled);
        assert_eq!(config.window.minimize_pause(), Duration::from_millis(50));
    }

    #[test]
    fn test_invalid_window_method() {
        let mut config = Config::default();
        config.window.method = "wmctrl".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_logging_settings() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.format = "json".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_formats() {
        for format in ["pretty", "compact"] {
            let mut config = Config::default();
            config.logging.format = format.to_string();
            assert!(config.validate().is_ok(), "формат {} должен приниматься", format);
        }
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = Figment::new()
            .merge(Toml::string("[gesture]\nenabled = false\n\n[window]\nmethod = \"xdotool\"\n"))
            .extract()
            .expect("конфигурация должна разбираться");

        assert!(!config.gesture.enabled);
        assert_eq!(config.window.method, "xdotool");
        assert_eq!(config.window.minimize_pause_ms, 50);
        assert_eq!(config.input.device_path, "auto");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load("/non/existent/swipemin.toml").expect("должны использоваться значения по умолчанию");
        assert_eq!(config.logging.level, "info");
    }
}
