use crate::events::Frame;

/// Свертка кадра: число активных контактов и их средняя высота
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub active_count: usize,
    /// `None`, если активных контактов нет
    pub average_y: Option<f32>,
}

impl FrameSummary {
    pub fn new(active_count: usize, average_y: Option<f32>) -> Self {
        Self {
            active_count,
            average_y,
        }
    }
}

pub fn classify(frame: &Frame) -> FrameSummary {
    let (active_count, total_y) = frame
        .contacts
        .iter()
        .filter(|contact| contact.state.is_active())
        .fold((0usize, 0.0f32), |(count, sum), contact| (count + 1, sum + contact.y));

    let average_y = (active_count > 0).then(|| total_y / active_count as f32);

    FrameSummary {
        active_count,
        average_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ContactPoint, ContactState, Contacts};
    use smallvec::smallvec;
    use std::time::Instant;

    fn frame(contacts: Contacts) -> Frame {
        Frame::at(contacts, Instant::now(), 1, "test")
    }

    #[test]
    fn test_empty_frame() {
        let summary = classify(&frame(Contacts::new()));
        assert_eq!(summary.active_count, 0);
        assert_eq!(summary.average_y, None);
    }

    #[test]
    fn test_average_of_active_contacts_only() {
        let contacts: Contacts = smallvec![
            ContactPoint::touching(0.1, 0.4),
            ContactPoint::touching(0.5, 0.5),
            ContactPoint::new(0.9, 0.6, ContactState::BreakTouch),
            // Наведение и начало касания не считаются
            ContactPoint::new(0.3, 0.9, ContactState::HoverInRange),
            ContactPoint::new(0.7, 0.9, ContactState::MakeTouch),
        ];

        let summary = classify(&frame(contacts));
        assert_eq!(summary.active_count, 3);
        let average = summary.average_y.expect("есть активные контакты");
        assert!((average - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_only_inactive_contacts() {
        let contacts: Contacts = smallvec![
            ContactPoint::new(0.3, 0.2, ContactState::StartInRange),
            ContactPoint::new(0.4, 0.2, ContactState::HoverInRange),
        ];

        let summary = classify(&frame(contacts));
        assert_eq!(summary, FrameSummary::new(0, None));
    }

    #[test]
    fn test_classify_is_idempotent() {
        let f = Frame::touching_at(&[0.31, 0.47, 0.52, 0.66], Instant::now(), 9);
        assert_eq!(classify(&f), classify(&f));
    }
}
