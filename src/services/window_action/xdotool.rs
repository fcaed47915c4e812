use std::process::Command;

use super::command::WindowTool;

/// X11 (и XWayland) через xdotool
pub struct XdotoolTool;

impl XdotoolTool {
    pub fn new() -> Self {
        Self
    }
}

impl WindowTool for XdotoolTool {
    fn name(&self) -> &'static str {
        "xdotool"
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("xdotool");
        cmd.args(args);
        cmd
    }
}
