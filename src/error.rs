use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwipeError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Устройство не найдено: {0}")]
    DeviceNotFound(String),

    #[error("Недостаточно прав доступа: {0}")]
    Permission(String),

    #[error("Сенсор недоступен: {0}")]
    SensorUnavailable(String),

    #[error("Нет активного приложения")]
    NoForegroundApp,

    #[error("Не найдено окон у приложения {0}")]
    NoWindows(String),

    #[error("Не удалось свернуть ни одного окна: {0}")]
    MinimizeFailed(String),

    #[error("Сервис недоступен: {0}")]
    ServiceUnavailable(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl SwipeError {
    pub fn device_not_found<T>(msg: impl Into<String>) -> Result<T> {
        Err(SwipeError::DeviceNotFound(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, SwipeError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! swipe_error {
    (device_not_found, $($arg:tt)*) => {
        $crate::error::SwipeError::DeviceNotFound(format!($($arg)*))
    };
    (sensor_unavailable, $($arg:tt)*) => {
        $crate::error::SwipeError::SensorUnavailable(format!($($arg)*))
    };
}
