//! Ядро распознавания свайпа тремя пальцами.
//!
//! Модуль не знает ни про evdev, ни про оконные менеджеры: на вход подаются
//! уже декодированные кадры [`Frame`](crate::events::Frame), на выходе
//! получаются [`GestureEvent`](crate::events::GestureEvent) и решения шлюза.

mod classifier;
mod cooldown;
mod state_machine;

use std::time::Duration;

pub use classifier::{classify, FrameSummary};
pub use cooldown::CooldownGate;
pub use state_machine::{SwipeState, SwipeStateMachine};

/// Минимальное число активных контактов для эпизода
pub const MIN_FINGERS: usize = 3;

/// Порог смещения вниз в нормализованных единицах
pub const SWIPE_DOWN_THRESHOLD: f32 = 0.08;

/// Порог смещения вверх (по модулю)
pub const SWIPE_UP_THRESHOLD: f32 = 0.08;

/// После свайпа вверх свайпы вниз игнорируются в течение этого времени
pub const EXPOSE_COOLDOWN: Duration = Duration::from_secs(4);
