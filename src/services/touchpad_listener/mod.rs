mod dry_touchpad_listener;
mod slot_tracker;
mod touchpad_listener;
mod r#trait;

pub use self::r#trait::{create_touchpad_listener, TouchpadListenerTrait};
