use crate::events::GateOutcome;
use parking_lot::Mutex;
use std::time::{Duration, Instant};

use super::EXPOSE_COOLDOWN;

/// Подавление свайпа вниз после недавнего свайпа вверх.
///
/// Свайп вверх обычно открывает обзор окон, и свайп вниз вскоре после него
/// почти всегда означает выход из обзора, а не сворачивание.
#[derive(Debug)]
pub struct CooldownGate {
    last_swipe_up: Mutex<Option<Instant>>,
    cooldown: Duration,
}

impl CooldownGate {
    pub fn new() -> Self {
        Self::with_cooldown(EXPOSE_COOLDOWN)
    }

    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            last_swipe_up: Mutex::new(None),
            cooldown,
        }
    }

    pub fn record_swipe_up(&self, now: Instant) {
        *self.last_swipe_up.lock() = Some(now);
    }

    #[cfg(test)]
    pub fn last_swipe_up(&self) -> Option<Instant> {
        *self.last_swipe_up.lock()
    }

    pub fn evaluate_swipe_down(&self, now: Instant) -> GateOutcome {
        let Some(last) = *self.last_swipe_up.lock() else {
            return GateOutcome::Forwarded;
        };

        // Кадры разных устройств могут прийти с чуть более ранней меткой
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.cooldown {
            GateOutcome::SuppressedByCooldown { elapsed }
        } else {
            GateOutcome::Forwarded
        }
    }
}

impl Default for CooldownGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_without_swipe_up() {
        let gate = CooldownGate::new();
        assert_eq!(gate.evaluate_swipe_down(Instant::now()), GateOutcome::Forwarded);
        assert_eq!(gate.last_swipe_up(), None);
    }

    #[test]
    fn test_suppressed_inside_cooldown() {
        let gate = CooldownGate::new();
        let t = Instant::now();
        gate.record_swipe_up(t);

        let outcome = gate.evaluate_swipe_down(t + Duration::from_secs(2));
        assert_eq!(
            outcome,
            GateOutcome::SuppressedByCooldown {
                elapsed: Duration::from_secs(2)
            }
        );
    }

    #[test]
    fn test_forwarded_after_cooldown() {
        let gate = CooldownGate::new();
        let t = Instant::now();
        gate.record_swipe_up(t);

        assert_eq!(gate.evaluate_swipe_down(t + Duration::from_secs(5)), GateOutcome::Forwarded);
        // Ровно 4 секунды уже не подавляются
        assert_eq!(gate.evaluate_swipe_down(t + EXPOSE_COOLDOWN), GateOutcome::Forwarded);
    }

    #[test]
    fn test_new_swipe_up_restarts_cooldown() {
        let gate = CooldownGate::new();
        let t = Instant::now();
        gate.record_swipe_up(t);
        gate.record_swipe_up(t + Duration::from_secs(3));

        assert!(!gate.evaluate_swipe_down(t + Duration::from_secs(5)).is_forwarded());
        assert_eq!(gate.last_swipe_up(), Some(t + Duration::from_secs(3)));
    }

    #[test]
    fn test_earlier_timestamp_counts_as_zero_elapsed() {
        let gate = CooldownGate::new();
        let t = Instant::now() + Duration::from_secs(10);
        gate.record_swipe_up(t);

        assert_eq!(
            gate.evaluate_swipe_down(t - Duration::from_millis(5)),
            GateOutcome::SuppressedByCooldown {
                elapsed: Duration::ZERO
            }
        );
    }
}
