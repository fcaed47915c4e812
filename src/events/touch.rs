use smallvec::SmallVec;
use std::fmt;
use std::time::Instant;

/// Фаза контакта пальца с поверхностью сенсора.
///
/// Порядок вариантов значим: контакт считается активным, если его состояние
/// не ниже [`ContactState::TOUCHING_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ContactState {
    NotTracking = 0,
    StartInRange = 1,
    HoverInRange = 2,
    MakeTouch = 3,
    Touching = 4,
    BreakTouch = 5,
    LingerInRange = 6,
    OutOfRange = 7,
}

impl ContactState {
    pub const TOUCHING_THRESHOLD: ContactState = ContactState::Touching;

    pub fn is_active(self) -> bool {
        self >= Self::TOUCHING_THRESHOLD
    }
}

/// Один палец в одном кадре. Координаты нормализованы в [0, 1],
/// `y` = 0 внизу поверхности, 1 вверху.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    pub x: f32,
    pub y: f32,
    pub state: ContactState,
    pub slot: i32,
    pub tracking_id: i32,
}

impl ContactPoint {
    pub fn new(x: f32, y: f32, state: ContactState) -> Self {
        Self {
            x,
            y,
            state,
            slot: -1,
            tracking_id: -1,
        }
    }

    pub fn with_slot(mut self, slot: i32, tracking_id: i32) -> Self {
        self.slot = slot;
        self.tracking_id = tracking_id;
        self
    }

    pub fn touching(x: f32, y: f32) -> Self {
        Self::new(x, y, ContactState::Touching)
    }
}

/// Контакты одного кадра. У тачпадов обычно не больше 10 слотов.
pub type Contacts = SmallVec<[ContactPoint; 10]>;

/// Кадр сенсора: все контакты, зафиксированные между двумя SYN_REPORT
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub contacts: Contacts,
    pub timestamp: Instant,
    pub sequence: u64,
    pub device: String,
}

impl Frame {
    pub fn new(contacts: Contacts, sequence: u64, device: impl Into<String>) -> Self {
        Self::at(contacts, Instant::now(), sequence, device)
    }

    pub fn at(contacts: Contacts, timestamp: Instant, sequence: u64, device: impl Into<String>) -> Self {
        Self {
            contacts,
            timestamp,
            sequence,
            device: device.into(),
        }
    }

    /// Кадр, в котором все пальцы касаются поверхности на заданных высотах
    pub fn touching_at(ys: &[f32], timestamp: Instant, sequence: u64) -> Self {
        let contacts = ys
            .iter()
            .enumerate()
            .map(|(i, y)| ContactPoint::touching(0.25 + 0.2 * i as f32, *y))
            .collect();
        Self::at(contacts, timestamp, sequence, "synthetic")
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}[{}] {} контакт(ов)",
            self.sequence,
            self.device,
            self.contacts.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_state_threshold() {
        assert!(!ContactState::NotTracking.is_active());
        assert!(!ContactState::HoverInRange.is_active());
        assert!(!ContactState::MakeTouch.is_active());
        assert!(ContactState::Touching.is_active());
        assert!(ContactState::BreakTouch.is_active());
        assert!(ContactState::OutOfRange.is_active());
    }

    #[test]
    fn test_touching_frame_creation() {
        let now = Instant::now();
        let frame = Frame::touching_at(&[0.5, 0.6, 0.7], now, 7);

        assert_eq!(frame.contacts.len(), 3);
        assert_eq!(frame.sequence, 7);
        assert_eq!(frame.timestamp, now);
        assert!(frame.contacts.iter().all(|c| c.state == ContactState::Touching));
        assert_eq!(frame.contacts[1].y, 0.6);
    }
}
