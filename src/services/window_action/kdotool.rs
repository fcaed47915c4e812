use std::collections::HashMap;
use std::process::Command;
use tracing::debug;

use super::command::WindowTool;

/// KDE Plasma (в том числе Wayland) через kdotool
pub struct KdotoolTool;

/// Окружение для запуска kdotool из-под sudo.
///
/// kdotool общается с KWin через сессионную D-Bus шину. У процесса root её
/// нет, поэтому адрес шины и runtime-каталог берутся у SUDO_USER.
fn build_env_overrides() -> HashMap<String, String> {
    let mut env_vars = HashMap::new();

    if let Ok(display) = std::env::var("DISPLAY") {
        env_vars.insert("DISPLAY".to_string(), display);
    }

    if std::env::var("USER").map_or(true, |user| user != "root") {
        return env_vars;
    }
    let Ok(sudo_user) = std::env::var("SUDO_USER") else {
        return env_vars;
    };
    let Some(uid) = user_uid(&sudo_user) else {
        return env_vars;
    };

    let runtime_dir = format!("/run/user/{}", uid);
    debug!("Сессия пользователя {} для kdotool: uid={}", sudo_user, uid);
    env_vars.insert("DBUS_SESSION_BUS_ADDRESS".to_string(), format!("unix:path={}/bus", runtime_dir));
    env_vars.insert("XDG_RUNTIME_DIR".to_string(), runtime_dir);
    env_vars.insert("USER".to_string(), sudo_user);
    env_vars
}

fn user_uid(user: &str) -> Option<String> {
    let output = Command::new("id").args(["-u", user]).output().ok()?;
    let uid = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (output.status.success() && !uid.is_empty()).then_some(uid)
}

impl KdotoolTool {
    pub fn new() -> Self {
        Self
    }
}

impl WindowTool for KdotoolTool {
    fn name(&self) -> &'static str {
        "kdotool"
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = if let Ok(sudo_user) = std::env::var("SUDO_USER") {
            let mut cmd = Command::new("sudo");
            cmd.args(["-E", "-u", sudo_user.as_str(), "kdotool"]);
            cmd.args(args);
            cmd
        } else {
            let mut cmd = Command::new("kdotool");
            cmd.args(args);
            cmd
        };

        for (key, value) in build_env_overrides() {
            cmd.env(key, value);
        }

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_uid() {
        assert_eq!(user_uid("root").as_deref(), Some("0"));
        assert_eq!(user_uid("no-such-user-swipemin"), None);
    }

    #[test]
    fn test_command_passes_arguments() {
        let cmd = KdotoolTool::new().command(&["getactivewindow"]);
        let args: Vec<_> = cmd.get_args().map(|arg| arg.to_string_lossy().into_owned()).collect();
        assert_eq!(args.last().map(String::as_str), Some("getactivewindow"));
    }
}
