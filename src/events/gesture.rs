use std::fmt;
use std::time::Duration;

/// Жест, распознанный за эпизод касания
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Пальцы сместились вниз: `delta_y` = start_y - average_y > 0
    SwipeDown { delta_y: f32, fingers: usize },
    /// Пальцы сместились вверх (обычно открывает обзор окон)
    SwipeUp { delta_y: f32, fingers: usize },
}

impl GestureEvent {
    #[cfg(test)]
    pub fn is_swipe_down(&self) -> bool {
        matches!(self, GestureEvent::SwipeDown { .. })
    }

    #[cfg(test)]
    pub fn delta_y(&self) -> f32 {
        match *self {
            GestureEvent::SwipeDown { delta_y, .. } | GestureEvent::SwipeUp { delta_y, .. } => delta_y,
        }
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureEvent::SwipeDown { delta_y, fingers } => {
                write!(f, "свайп вниз (delta: {:.3}, пальцев: {})", delta_y, fingers)
            }
            GestureEvent::SwipeUp { delta_y, fingers } => {
                write!(f, "свайп вверх (delta: {:.3}, пальцев: {})", delta_y, fingers)
            }
        }
    }
}

/// Решение шлюза для свайпа вниз
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Forwarded,
    SuppressedByCooldown { elapsed: Duration },
    SuppressedDisabled,
    SuppressedNoPermission,
}

impl GateOutcome {
    pub fn is_forwarded(&self) -> bool {
        matches!(self, GateOutcome::Forwarded)
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateOutcome::Forwarded => write!(f, "передано на сворачивание"),
            GateOutcome::SuppressedByCooldown { elapsed } => write!(
                f,
                "подавлено: свайп вверх был {:.1}с назад",
                elapsed.as_secs_f32()
            ),
            GateOutcome::SuppressedDisabled => write!(f, "подавлено: функция отключена"),
            GateOutcome::SuppressedNoPermission => {
                write!(f, "подавлено: нет доступа к управлению окнами")
            }
        }
    }
}

/// Итог обработки одного кадра
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Nothing,
    SwipeUpRecorded,
    SwipeDown(GateOutcome),
}

/// Запрос к контексту, выполняющему действия с окнами
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionRequest {
    MinimizeFocusedApp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_event_accessors() {
        let down = GestureEvent::SwipeDown { delta_y: 0.1, fingers: 3 };
        let up = GestureEvent::SwipeUp { delta_y: -0.1, fingers: 4 };

        assert!(down.is_swipe_down());
        assert!(!up.is_swipe_down());
        assert_eq!(up.delta_y(), -0.1);
    }

    #[test]
    fn test_gate_outcome_display() {
        let outcome = GateOutcome::SuppressedByCooldown {
            elapsed: Duration::from_millis(2000),
        };
        assert_eq!(outcome.to_string(), "подавлено: свайп вверх был 2.0с назад");
        assert!(!outcome.is_forwarded());
        assert!(GateOutcome::Forwarded.is_forwarded());
    }
}
