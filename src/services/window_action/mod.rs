//! WindowAction service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for minimizing the windows
//! of the foreground application through an external tool (xdotool/kdotool).
//! It MUST NOT contain any gesture logic: whether to act at all is decided
//! exclusively by GestureEngine before a request reaches the executor.

mod command;
mod dry_run;
mod kdotool;
mod window_action;
mod xdotool;
mod r#trait;

pub use self::r#trait::{create_window_action, WindowActionTrait};
