use crate::config::Config;
use crate::debug_if_enabled;
use crate::events::{ActionRequest, Frame, FrameOutcome, GateOutcome, GestureEvent};
use crate::services::gesture::{classify, CooldownGate, SwipeStateMachine};
use crate::services::ActionDispatcher;
use crate::utils::permissions::AccessProbe;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Общее для всех тачпадов состояние распознавания.
///
/// Кадры со всех устройств сливаются в один поток: автомат и шлюз одни на
/// процесс. Вызывается из потоков чтения сенсора на каждом кадре, поэтому
/// ничего не блокирует дольше, чем держится мьютекс автомата.
pub struct GestureEngine {
    state_machine: Mutex<SwipeStateMachine>,
    cooldown: CooldownGate,
    enabled: AtomicBool,
    access: Arc<dyn AccessProbe>,
    dispatcher: ActionDispatcher,
}

impl GestureEngine {
    pub fn new(config: &Config, access: Arc<dyn AccessProbe>, dispatcher: ActionDispatcher) -> Self {
        info!(
            "Инициализация GestureEngine (функция включена: {})",
            config.gesture.enabled
        );

        Self::with_gate(config.gesture.enabled, CooldownGate::new(), access, dispatcher)
    }

    pub fn with_gate(
        enabled: bool,
        cooldown: CooldownGate,
        access: Arc<dyn AccessProbe>,
        dispatcher: ActionDispatcher,
    ) -> Self {
        Self {
            state_machine: Mutex::new(SwipeStateMachine::new()),
            cooldown,
            enabled: AtomicBool::new(enabled),
            access,
            dispatcher,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        info!("Сворачивание свайпом: {}", if enabled { "включено" } else { "отключено" });
    }

    /// Переключить флаг и вернуть новое значение
    pub fn toggle_enabled(&self) -> bool {
        let enabled = !self.enabled.fetch_xor(true, Ordering::Relaxed);
        info!("Сворачивание свайпом: {}", if enabled { "включено" } else { "отключено" });
        enabled
    }

    /// Обработать кадр сенсора. Никогда не паникует и не возвращает ошибку:
    /// поток кадров должен идти дальше при любом исходе.
    pub fn handle_frame(&self, frame: &Frame) -> FrameOutcome {
        let summary = classify(frame);
        let (gesture, state) = {
            let mut state_machine = self.state_machine.lock();
            let gesture = state_machine.advance(&summary);
            (gesture, state_machine.state())
        };

        debug_if_enabled!(
            "Кадр {}: активных {}, средний Y {:?}, состояние {:?}",
            frame,
            summary.active_count,
            summary.average_y,
            state
        );

        match gesture {
            None => FrameOutcome::Nothing,
            Some(event @ GestureEvent::SwipeUp { .. }) => {
                info!("Обнаружен {} [{}], вероятно открыт обзор окон", event, frame.device);
                self.cooldown.record_swipe_up(frame.timestamp);
                FrameOutcome::SwipeUpRecorded
            }
            Some(event @ GestureEvent::SwipeDown { .. }) => {
                info!("Обнаружен {} [{}]", event, frame.device);
                let outcome = self.evaluate_swipe_down(frame.timestamp);
                info!("Свайп вниз: {}", outcome);

                if outcome.is_forwarded() {
                    self.dispatcher.submit(ActionRequest::MinimizeFocusedApp);
                }
                FrameOutcome::SwipeDown(outcome)
            }
        }
    }

    fn evaluate_swipe_down(&self, now: Instant) -> GateOutcome {
        // Флаги запрашиваются непосредственно перед действием
        if !self.is_enabled() {
            return GateOutcome::SuppressedDisabled;
        }
        if !self.access.is_granted() {
            return GateOutcome::SuppressedNoPermission;
        }
        self.cooldown.evaluate_swipe_down(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ContactPoint, Contacts};
    use smallvec::smallvec;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    struct StaticAccess(bool);

    impl AccessProbe for StaticAccess {
        fn is_granted(&self) -> bool {
            self.0
        }
    }

    fn engine(enabled: bool, granted: bool) -> (GestureEngine, UnboundedReceiver<ActionRequest>) {
        let (dispatcher, rx) = ActionDispatcher::channel();
        let engine = GestureEngine::with_gate(
            enabled,
            CooldownGate::new(),
            Arc::new(StaticAccess(granted)),
            dispatcher,
        );
        (engine, rx)
    }

    fn three_fingers(y: f32, at: Instant, seq: u64) -> Frame {
        Frame::touching_at(&[y, y, y], at, seq)
    }

    fn lift(at: Instant, seq: u64) -> Frame {
        Frame::at(Contacts::new(), at, seq, "synthetic")
    }

    /// Полный эпизод: касание, движение, отпускание. Возвращает исход движения.
    fn swipe(engine: &GestureEngine, from: f32, to: f32, at: Instant) -> FrameOutcome {
        assert_eq!(engine.handle_frame(&three_fingers(from, at, 1)), FrameOutcome::Nothing);
        let outcome = engine.handle_frame(&three_fingers(to, at, 2));
        assert_eq!(engine.handle_frame(&lift(at, 3)), FrameOutcome::Nothing);
        outcome
    }

    #[test]
    fn test_swipe_down_forwards_one_request() {
        let (engine, mut rx) = engine(true, true);
        let t = Instant::now();

        let outcome = swipe(&engine, 0.60, 0.50, t);
        assert_eq!(outcome, FrameOutcome::SwipeDown(GateOutcome::Forwarded));
        assert_eq!(rx.try_recv().ok(), Some(ActionRequest::MinimizeFocusedApp));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_slow_swipe_triggers_once() {
        let (engine, mut rx) = engine(true, true);
        let t = Instant::now();

        engine.handle_frame(&three_fingers(0.80, t, 1));
        let outcomes: Vec<_> = (1..=10)
            .map(|i| engine.handle_frame(&three_fingers(0.80 - 0.03 * i as f32, t, 1 + i)))
            .filter(|o| *o != FrameOutcome::Nothing)
            .collect();

        assert_eq!(outcomes, vec![FrameOutcome::SwipeDown(GateOutcome::Forwarded)]);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_swipe_up_suppresses_following_swipe_down() {
        let (engine, mut rx) = engine(true, true);
        let t = Instant::now();

        assert_eq!(swipe(&engine, 0.40, 0.50, t), FrameOutcome::SwipeUpRecorded);

        let outcome = swipe(&engine, 0.60, 0.50, t + Duration::from_secs(2));
        assert_eq!(
            outcome,
            FrameOutcome::SwipeDown(GateOutcome::SuppressedByCooldown {
                elapsed: Duration::from_secs(2)
            })
        );
        assert!(rx.try_recv().is_err());

        let outcome = swipe(&engine, 0.60, 0.50, t + Duration::from_secs(5));
        assert_eq!(outcome, FrameOutcome::SwipeDown(GateOutcome::Forwarded));
        assert_eq!(rx.try_recv().ok(), Some(ActionRequest::MinimizeFocusedApp));
    }

    #[test]
    fn test_disabled_feature_withholds_action() {
        let (engine, mut rx) = engine(false, true);
        let outcome = swipe(&engine, 0.60, 0.50, Instant::now());

        assert_eq!(outcome, FrameOutcome::SwipeDown(GateOutcome::SuppressedDisabled));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_missing_permission_withholds_action() {
        let (engine, mut rx) = engine(true, false);
        let outcome = swipe(&engine, 0.60, 0.50, Instant::now());

        assert_eq!(outcome, FrameOutcome::SwipeDown(GateOutcome::SuppressedNoPermission));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_swipe_up_recorded_while_disabled() {
        let (engine, mut rx) = engine(false, true);
        let t = Instant::now();

        assert_eq!(swipe(&engine, 0.40, 0.50, t), FrameOutcome::SwipeUpRecorded);
        engine.set_enabled(true);

        let outcome = swipe(&engine, 0.60, 0.50, t + Duration::from_secs(1));
        assert!(matches!(
            outcome,
            FrameOutcome::SwipeDown(GateOutcome::SuppressedByCooldown { .. })
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_two_fingers_never_emit() {
        let (engine, mut rx) = engine(true, true);
        let t = Instant::now();

        for (i, y) in [0.9f32, 0.5, 0.1, 0.9].iter().enumerate() {
            let frame = Frame::touching_at(&[*y, *y], t, i as u64);
            assert_eq!(engine.handle_frame(&frame), FrameOutcome::Nothing);
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_devices_share_one_episode() {
        let (engine, _rx) = engine(true, true);
        let t = Instant::now();

        let first: Contacts = smallvec![
            ContactPoint::touching(0.2, 0.6),
            ContactPoint::touching(0.4, 0.6),
            ContactPoint::touching(0.6, 0.6),
        ];
        let second: Contacts = smallvec![
            ContactPoint::touching(0.2, 0.5),
            ContactPoint::touching(0.4, 0.5),
            ContactPoint::touching(0.6, 0.5),
        ];

        engine.handle_frame(&Frame::at(first, t, 1, "touchpad-a"));
        let outcome = engine.handle_frame(&Frame::at(second, t, 1, "touchpad-b"));
        assert_eq!(outcome, FrameOutcome::SwipeDown(GateOutcome::Forwarded));
    }

    #[test]
    fn test_toggle_enabled() {
        let (engine, _rx) = engine(true, true);
        assert!(!engine.toggle_enabled());
        assert!(!engine.is_enabled());
        assert!(engine.toggle_enabled());
        assert!(engine.is_enabled());
    }
}
