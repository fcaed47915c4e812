use crate::error::{SwipeError, Result};
use std::process::{Command, Output};
use tracing::debug;

/// Общий набор операций xdotool-совместимых утилит
pub trait WindowTool: Send + Sync {
    fn name(&self) -> &'static str;

    fn command(&self, args: &[&str]) -> Command;

    /// Проверить, что утилита установлена и видит активное окно
    fn test(&self) -> Result<()> {
        run(self.name(), self.command(&["getactivewindow"])).map(|_| ())
    }

    fn active_window(&self) -> Result<String> {
        // Код 1 - активного окна нет; отсутствие утилиты пробрасывается как есть
        run_allowing(self.name(), self.command(&["getactivewindow"]), NOT_FOUND_EXIT_CODE)?
            .filter(|id| !id.is_empty())
            .ok_or(SwipeError::NoForegroundApp)
    }

    fn window_pid(&self, window_id: &str) -> Result<u32> {
        let output = run(self.name(), self.command(&["getwindowpid", window_id]))?;
        output.parse().map_err(|_| {
            SwipeError::Internal(format!("{} вернул некорректный pid: '{}'", self.name(), output))
        })
    }

    fn window_class(&self, window_id: &str) -> Option<String> {
        run(self.name(), self.command(&["getwindowclassname", window_id]))
            .ok()
            .filter(|class| !class.is_empty())
    }

    fn visible_windows(&self, pid: u32) -> Result<Vec<String>> {
        let pid = pid.to_string();
        // search завершается с кодом 1, если ничего не нашлось
        let output = run_allowing(
            self.name(),
            self.command(&["search", "--onlyvisible", "--pid", &pid]),
            NOT_FOUND_EXIT_CODE,
        )?;
        Ok(output.map(|out| parse_window_ids(&out)).unwrap_or_default())
    }

    fn minimize(&self, window_id: &str) -> Result<()> {
        run(self.name(), self.command(&["windowminimize", window_id])).map(|_| ())
    }
}

/// Код выхода xdotool/kdotool, когда искомое окно не найдено
const NOT_FOUND_EXIT_CODE: i32 = 1;

/// Выполнить команду и вернуть stdout без пробелов по краям
pub fn run(tool: &str, cmd: Command) -> Result<String> {
    let output = spawn(tool, cmd)?;
    if !output.status.success() {
        return Err(exit_error(tool, &output));
    }
    Ok(stdout(&output))
}

/// Как [`run`], но указанный код выхода означает "ничего не найдено" и даёт `None`
fn run_allowing(tool: &str, cmd: Command, allowed_code: i32) -> Result<Option<String>> {
    let output = spawn(tool, cmd)?;
    if output.status.code() == Some(allowed_code) {
        return Ok(None);
    }
    if !output.status.success() {
        return Err(exit_error(tool, &output));
    }
    Ok(Some(stdout(&output)))
}

fn spawn(tool: &str, mut cmd: Command) -> Result<Output> {
    cmd.output().map_err(|e| {
        debug!("{} не найден или не работает: {}", tool, e);
        SwipeError::ServiceUnavailable(format!("{} не найден: {}", tool, e))
    })
}

fn exit_error(tool: &str, output: &Output) -> SwipeError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    debug!("{} вернул ошибку ({}): {}", tool, output.status, stderr.trim());

    match output.status.code() {
        Some(_) => SwipeError::Internal(format!("{} вернул ошибку: {}", tool, stderr.trim())),
        // Процесс убит сигналом: утилита неработоспособна
        None => SwipeError::ServiceUnavailable(format!("{} аварийно завершился: {}", tool, output.status)),
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn parse_window_ids(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
