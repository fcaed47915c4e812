use crate::error::Result;
use crate::events::{Contacts, Frame, FrameOutcome};
use crate::services::GestureEngine;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{sleep, Duration};
use tracing::info;

const FRAME_INTERVAL: Duration = Duration::from_millis(10);
const FRAMES_PER_SWIPE: u32 = 8;

/// Сценарий эмуляции: (пауза перед свайпом, начальный Y, конечный Y, описание)
const SCRIPT: [(u64, f32, f32, &str); 3] = [
    (3, 0.40, 0.60, "свайп вверх"),
    (2, 0.60, 0.40, "свайп вниз во время задержки"),
    (5, 0.60, 0.40, "свайп вниз после задержки"),
];

pub struct DryRunTouchpadListener {
    engine: Arc<GestureEngine>,
    sequence: u64,
}

impl DryRunTouchpadListener {
    pub fn new(engine: Arc<GestureEngine>) -> Self {
        info!("Инициализация DryRunTouchpadListener");
        Self { engine, sequence: 0 }
    }

    async fn run_impl(mut self) -> Result<()> {
        info!("Dry-run режим - TouchpadListener работает в режиме эмуляции");

        loop {
            for (pause_secs, from, to, description) in SCRIPT {
                sleep(Duration::from_secs(pause_secs)).await;
                info!("Dry-run: эмулируем {}", description);

                let outcome = self.emulate_swipe(from, to).await;
                info!("Dry-run: итог {:?}", outcome);
            }
        }
    }

    /// Три пальца плавно проходят от `from` до `to`, затем поднимаются
    async fn emulate_swipe(&mut self, from: f32, to: f32) -> FrameOutcome {
        let mut result = FrameOutcome::Nothing;

        for step in 0..=FRAMES_PER_SWIPE {
            let y = from + (to - from) * step as f32 / FRAMES_PER_SWIPE as f32;
            let frame = Frame::touching_at(&[y, y + 0.01, y - 0.01], Instant::now(), self.next_sequence());

            let outcome = self.engine.handle_frame(&frame);
            if outcome != FrameOutcome::Nothing {
                result = outcome;
            }
            sleep(FRAME_INTERVAL).await;
        }

        let lift = Frame::new(Contacts::new(), self.next_sequence(), "dry-run");
        self.engine.handle_frame(&lift);

        result
    }

    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

#[async_trait::async_trait]
impl super::r#trait::TouchpadListenerTrait for DryRunTouchpadListener {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}
