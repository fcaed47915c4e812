use crate::config::Config;
use crate::error::Result;
use crate::services::GestureEngine;
use std::sync::Arc;

/// Trait for touchpad listeners (sensor sources) that can run in different modes
#[async_trait::async_trait]
pub trait TouchpadListenerTrait {
    /// Feed frames into the gesture engine until the source is exhausted
    async fn run(self: Box<Self>) -> Result<()>;
}

/// Factory function to create an appropriate touchpad listener based on the dry_run flag
pub fn create_touchpad_listener(
    config: Arc<Config>,
    engine: Arc<GestureEngine>,
    dry_run: bool,
) -> Result<Box<dyn TouchpadListenerTrait + Send>> {
    if dry_run {
        Ok(Box::new(super::dry_touchpad_listener::DryRunTouchpadListener::new(engine)))
    } else {
        Ok(Box::new(super::touchpad_listener::RealTouchpadListener::new(
            config, engine,
        )?))
    }
}
