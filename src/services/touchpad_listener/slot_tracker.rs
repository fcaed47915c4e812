use crate::error::Result;
use crate::events::{ContactPoint, ContactState, Contacts, Frame};
use crate::{swipe_error, trace_if_enabled};
use evdev::{AbsoluteAxisCode, EventType, InputEvent, SynchronizationCode};

/// Значение ABS_MT_TOOL_TYPE для ладони
const MT_TOOL_PALM: i32 = 2;

const DEFAULT_SLOT_COUNT: usize = 10;

/// Диапазон абсолютной оси устройства
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn normalize(&self, value: i32) -> f32 {
        if self.max <= self.min {
            return 0.0;
        }
        let span = (self.max - self.min) as f32;
        ((value - self.min) as f32 / span).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    tracking_id: i32,
    x: i32,
    y: i32,
    distance: i32,
    tool_type: i32,
    /// id пальца, поднятого в текущем кадре
    lifted_id: Option<i32>,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            tracking_id: -1,
            x: 0,
            y: 0,
            distance: 0,
            tool_type: 0,
            lifted_id: None,
        }
    }
}

/// Декодер multitouch протокола B в кадры.
///
/// События EV_ABS накапливаются по слотам, на SYN_REPORT выдаётся [`Frame`].
/// Ось Y переворачивается: у evdev она растёт вниз, в кадре 0 - низ тачпада.
#[derive(Debug)]
pub struct SlotTracker {
    device: String,
    x_range: AxisRange,
    y_range: AxisRange,
    slots: Vec<Slot>,
    current: usize,
    sequence: u64,
    dropped: bool,
}

impl SlotTracker {
    pub fn new(device: impl Into<String>, x_range: AxisRange, y_range: AxisRange, slot_count: usize) -> Self {
        Self {
            device: device.into(),
            x_range,
            y_range,
            slots: vec![Slot::default(); slot_count.max(1)],
            current: 0,
            sequence: 0,
            dropped: false,
        }
    }

    /// Построить трекер по диапазонам осей открытого устройства
    pub fn from_device(device: &evdev::Device) -> Result<Self> {
        let name = device.name().unwrap_or("Unknown").to_string();

        let mut x_range = None;
        let mut y_range = None;
        let mut slot_count = DEFAULT_SLOT_COUNT;
        let mut current_slot = 0;

        for (axis, info) in device.get_absinfo()? {
            match axis {
                AbsoluteAxisCode::ABS_MT_POSITION_X => {
                    x_range = Some(AxisRange::new(info.minimum(), info.maximum()))
                }
                AbsoluteAxisCode::ABS_MT_POSITION_Y => {
                    y_range = Some(AxisRange::new(info.minimum(), info.maximum()))
                }
                AbsoluteAxisCode::ABS_MT_SLOT => {
                    slot_count = (info.maximum().max(0) + 1) as usize;
                    current_slot = info.value().max(0) as usize;
                }
                _ => {}
            }
        }

        let (Some(x_range), Some(y_range)) = (x_range, y_range) else {
            return Err(swipe_error!(
                sensor_unavailable,
                "Устройство '{}' не сообщает диапазон ABS_MT_POSITION_X/Y",
                name
            ));
        };

        let mut tracker = Self::new(name, x_range, y_range, slot_count);
        tracker.current = current_slot.min(tracker.slots.len() - 1);
        Ok(tracker)
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn apply_event(&mut self, event: &InputEvent) -> Option<Frame> {
        self.apply(event.event_type(), event.code(), event.value())
    }

    /// Применить одно событие; возвращает кадр на SYN_REPORT
    pub fn apply(&mut self, event_type: EventType, code: u16, value: i32) -> Option<Frame> {
        match event_type {
            EventType::SYNCHRONIZATION => self.apply_sync(code),
            EventType::ABSOLUTE if !self.dropped => {
                self.apply_abs(AbsoluteAxisCode(code), value);
                None
            }
            _ => None,
        }
    }

    fn apply_sync(&mut self, code: u16) -> Option<Frame> {
        if code == SynchronizationCode::SYN_DROPPED.0 {
            trace_if_enabled!("[{}] SYN_DROPPED, состояние слотов сброшено", self.device);
            self.dropped = true;
            return None;
        }

        if code != SynchronizationCode::SYN_REPORT.0 {
            return None;
        }

        if self.dropped {
            // Состояние неизвестно: пустой кадр завершает текущий эпизод
            self.dropped = false;
            self.slots.iter_mut().for_each(|slot| *slot = Slot::default());
        }

        Some(self.emit_frame())
    }

    fn apply_abs(&mut self, axis: AbsoluteAxisCode, value: i32) {
        if axis == AbsoluteAxisCode::ABS_MT_SLOT {
            if value >= 0 && (value as usize) < self.slots.len() {
                self.current = value as usize;
            }
            return;
        }

        let slot = &mut self.slots[self.current];
        match axis {
            AbsoluteAxisCode::ABS_MT_TRACKING_ID => {
                if value < 0 {
                    if slot.tracking_id >= 0 {
                        slot.lifted_id = Some(slot.tracking_id);
                    }
                    slot.tracking_id = -1;
                } else {
                    slot.tracking_id = value;
                    slot.lifted_id = None;
                    slot.distance = 0;
                    slot.tool_type = 0;
                }
            }
            AbsoluteAxisCode::ABS_MT_POSITION_X => slot.x = value,
            AbsoluteAxisCode::ABS_MT_POSITION_Y => slot.y = value,
            AbsoluteAxisCode::ABS_MT_DISTANCE => slot.distance = value,
            AbsoluteAxisCode::ABS_MT_TOOL_TYPE => slot.tool_type = value,
            _ => {}
        }
    }

    fn emit_frame(&mut self) -> Frame {
        let mut contacts = Contacts::new();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let (tracking_id, state) = if slot.tracking_id >= 0 {
                let state = if slot.tool_type == MT_TOOL_PALM {
                    ContactState::StartInRange
                } else if slot.distance > 0 {
                    ContactState::HoverInRange
                } else {
                    ContactState::Touching
                };
                (slot.tracking_id, state)
            } else if let Some(id) = slot.lifted_id.take() {
                (id, ContactState::BreakTouch)
            } else {
                continue;
            };

            let x = self.x_range.normalize(slot.x);
            let y = 1.0 - self.y_range.normalize(slot.y);
            contacts.push(ContactPoint::new(x, y, state).with_slot(index as i32, tracking_id));
        }

        self.sequence += 1;
        Frame::new(contacts, self.sequence, self.device.clone())
    }
}
