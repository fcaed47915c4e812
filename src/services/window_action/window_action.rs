use crate::config::Config;
use crate::error::{SwipeError, Result};
use crate::events::{ForegroundApp, MinimizeReport};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::command::WindowTool;
use super::kdotool::KdotoolTool;
use super::r#trait::WindowActionTrait;
use super::xdotool::XdotoolTool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkingMethod {
    Kdotool,
    Xdotool,
}

pub struct RealWindowAction {
    config: Arc<Config>,
    working_method: Mutex<Option<WorkingMethod>>,

    // Утилиты управления окнами
    kdotool: Box<dyn WindowTool>,
    xdotool: Box<dyn WindowTool>,
}

impl RealWindowAction {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        Self::with_tools(config, Box::new(KdotoolTool::new()), Box::new(XdotoolTool::new()))
    }

    fn with_tools(
        config: Arc<Config>,
        kdotool: Box<dyn WindowTool>,
        xdotool: Box<dyn WindowTool>,
    ) -> Result<Self> {
        info!("Инициализация RealWindowAction (метод: {})", config.window.method);

        let working_method = match config.window.method.as_str() {
            "auto" => None,
            "kdotool" => Some(WorkingMethod::Kdotool),
            "xdotool" => Some(WorkingMethod::Xdotool),
            other => {
                return Err(SwipeError::Internal(format!(
                    "Неизвестный метод управления окнами: {}",
                    other
                )))
            }
        };

        Ok(Self {
            config,
            working_method: Mutex::new(working_method),
            kdotool,
            xdotool,
        })
    }

    fn tool(&self, method: WorkingMethod) -> &dyn WindowTool {
        match method {
            WorkingMethod::Kdotool => self.kdotool.as_ref(),
            WorkingMethod::Xdotool => self.xdotool.as_ref(),
        }
    }

    fn detect_working_method(&self) -> Result<WorkingMethod> {
        info!("Определяем рабочий метод управления окнами...");

        for method in [WorkingMethod::Kdotool, WorkingMethod::Xdotool] {
            if self.tool(method).test().is_ok() {
                info!("Используем {}", self.tool(method).name());
                return Ok(method);
            }
        }

        Err(SwipeError::ServiceUnavailable(
            "ни kdotool, ни xdotool не работают".to_string(),
        ))
    }

    fn current_method(&self) -> Result<WorkingMethod> {
        let mut working_method = self.working_method.lock();
        if let Some(method) = *working_method {
            return Ok(method);
        }

        let method = self.detect_working_method()?;
        *working_method = Some(method);
        Ok(method)
    }
}

/// Свернуть все видимые окна приложения, владеющего активным окном
fn minimize_foreground_app(tool: &dyn WindowTool, pause: Duration) -> Result<MinimizeReport> {
    let active = tool.active_window()?;
    let pid = tool.window_pid(&active)?;
    let app = match tool.window_class(&active) {
        Some(class) => ForegroundApp::new(pid).with_name(class),
        None => ForegroundApp::new(pid),
    };

    info!("Сворачиваем: {}", app);

    let windows = tool.visible_windows(pid)?;
    if windows.is_empty() {
        return Err(SwipeError::NoWindows(app.to_string()));
    }

    let mut minimized = 0;
    for window in &windows {
        match tool.minimize(window) {
            Ok(()) => {
                minimized += 1;
                // Даём анимации сворачивания закончиться
                std::thread::sleep(pause);
            }
            Err(e) => debug!("Окно {} не свернуто: {}", window, e),
        }
    }

    if minimized == 0 {
        return Err(SwipeError::MinimizeFailed(format!(
            "{} ({} окон)",
            app,
            windows.len()
        )));
    }

    Ok(MinimizeReport { app, minimized })
}

impl WindowActionTrait for RealWindowAction {
    fn minimize_focused_app(&self) -> Result<MinimizeReport> {
        let method = self.current_method()?;
        let result = minimize_foreground_app(self.tool(method), self.config.window.minimize_pause());

        if let Err(SwipeError::ServiceUnavailable(reason)) = &result {
            if self.config.window.method == "auto" {
                warn!("Метод {:?} перестал работать: {}. Переопределим при следующем жесте", method, reason);
                *self.working_method.lock() = None;
            }
        }

        result
    }
}
