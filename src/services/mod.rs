pub mod action_dispatcher;
pub mod gesture;
pub mod gesture_engine;
pub mod touchpad_listener;
pub mod window_action;

pub use action_dispatcher::{ActionDispatcher, ActionExecutor};
pub use gesture_engine::GestureEngine;
pub use touchpad_listener::create_touchpad_listener;
pub use window_action::create_window_action;
