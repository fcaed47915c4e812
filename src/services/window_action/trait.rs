use crate::config::Config;
use crate::error::Result;
use crate::events::MinimizeReport;
use std::sync::Arc;

/// Collaborator that performs the actual platform window action
pub trait WindowActionTrait: Send + Sync {
    /// Minimize all visible windows of the foreground application.
    /// Blocking: call it from the action executor, never from a sensor thread.
    fn minimize_focused_app(&self) -> Result<MinimizeReport>;
}

/// Factory function to create an appropriate window action based on the dry_run flag
pub fn create_window_action(config: Arc<Config>, dry_run: bool) -> Result<Arc<dyn WindowActionTrait>> {
    if dry_run {
        Ok(Arc::new(super::dry_run::DryRunWindowAction::new()))
    } else {
        Ok(Arc::new(super::window_action::RealWindowAction::new(config)?))
    }
}
