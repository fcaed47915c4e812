pub mod gesture;
pub mod touch;
pub mod window;

pub use gesture::{ActionRequest, FrameOutcome, GateOutcome, GestureEvent};
pub use touch::{ContactPoint, ContactState, Contacts, Frame};
pub use window::{ForegroundApp, MinimizeReport};
