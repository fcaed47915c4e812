use crate::events::GestureEvent;

use super::classifier::FrameSummary;
use super::{MIN_FINGERS, SWIPE_DOWN_THRESHOLD, SWIPE_UP_THRESHOLD};

/// Состояние эпизода касания
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeState {
    /// Меньше трёх активных пальцев
    Idle,
    /// Эпизод идёт, порог ещё не пересечён
    Tracking { start_y: f32 },
    /// Жест в этом эпизоде уже сработал
    Triggered { start_y: f32, gesture: GestureEvent },
}

/// Конечный автомат свайпа.
///
/// Граница эпизода определяется только числом активных пальцев: как только их
/// становится меньше трёх, автомат возвращается в `Idle`. За эпизод выдаётся
/// не больше одного события, иначе медленный свайп срабатывал бы на каждом
/// кадре после порога.
#[derive(Debug, Clone)]
pub struct SwipeStateMachine {
    state: SwipeState,
}

impl SwipeStateMachine {
    pub fn new() -> Self {
        Self {
            state: SwipeState::Idle,
        }
    }

    pub fn state(&self) -> SwipeState {
        self.state
    }

    #[cfg(test)]
    pub fn is_tracking(&self) -> bool {
        !matches!(self.state, SwipeState::Idle)
    }

    pub fn reset(&mut self) {
        self.state = SwipeState::Idle;
    }

    /// Продвинуть автомат на один кадр
    pub fn advance(&mut self, summary: &FrameSummary) -> Option<GestureEvent> {
        let average_y = match summary.average_y {
            Some(y) if summary.active_count >= MIN_FINGERS => y,
            _ => {
                self.reset();
                return None;
            }
        };

        match self.state {
            SwipeState::Idle => {
                self.state = SwipeState::Tracking { start_y: average_y };
                None
            }
            SwipeState::Tracking { start_y } => {
                // Нормализованный Y растёт вверх: положительная дельта - движение вниз
                let delta_y = start_y - average_y;
                let fingers = summary.active_count;

                let gesture = if delta_y > SWIPE_DOWN_THRESHOLD {
                    GestureEvent::SwipeDown { delta_y, fingers }
                } else if delta_y < -SWIPE_UP_THRESHOLD {
                    GestureEvent::SwipeUp { delta_y, fingers }
                } else {
                    return None;
                };

                self.state = SwipeState::Triggered { start_y, gesture };
                Some(gesture)
            }
            SwipeState::Triggered { .. } => None,
        }
    }
}

impl Default for SwipeStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
