use crate::error::Result;
use crate::events::{ForegroundApp, MinimizeReport};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

use super::r#trait::WindowActionTrait;

pub struct DryRunWindowAction {
    calls: AtomicUsize,
}

impl DryRunWindowAction {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl WindowActionTrait for DryRunWindowAction {
    fn minimize_focused_app(&self) -> Result<MinimizeReport> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        info!("[DRY RUN] Сворачивание окон активного приложения (#{})", call);

        Ok(MinimizeReport {
            app: ForegroundApp::new(std::process::id()).with_name("dry-run".to_string()),
            minimized: 1,
        })
    }
}
