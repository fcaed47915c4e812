use crate::events::ActionRequest;
use crate::services::window_action::WindowActionTrait;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

/// Передача действий из потоков сенсора в единственный исполняющий контекст.
///
/// Отправка никогда не блокирует и не ждёт результата.
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    tx: UnboundedSender<ActionRequest>,
}

impl ActionDispatcher {
    pub fn channel() -> (Self, UnboundedReceiver<ActionRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn submit(&self, request: ActionRequest) {
        if let Err(e) = self.tx.send(request) {
            warn!("Исполнитель действий остановлен, запрос {:?} отброшен", e.0);
        }
    }
}

/// Последовательно выполняет запросы через коллаборатор оконных действий
pub struct ActionExecutor {
    rx: UnboundedReceiver<ActionRequest>,
    window_action: Arc<dyn WindowActionTrait>,
}

impl ActionExecutor {
    pub fn new(rx: UnboundedReceiver<ActionRequest>, window_action: Arc<dyn WindowActionTrait>) -> Self {
        Self { rx, window_action }
    }

    pub async fn run(mut self) {
        info!("ActionExecutor запущен");

        while let Some(request) = self.rx.recv().await {
            debug!("Выполнение запроса: {:?}", request);
            match request {
                ActionRequest::MinimizeFocusedApp => {
                    Self::minimize_focused_app(Arc::clone(&self.window_action)).await
                }
            }
        }

        info!("ActionExecutor завершил работу: канал закрыт");
    }

    async fn minimize_focused_app(window_action: Arc<dyn WindowActionTrait>) {
        // Внешние утилиты блокируют поток, поэтому уходим в blocking пул, но
        // дожидаемся завершения: действия с окнами не должны пересекаться
        let result = tokio::task::spawn_blocking(move || window_action.minimize_focused_app()).await;

        match result {
            Ok(Ok(report)) => info!("Готово: {}", report),
            Ok(Err(e)) => warn!("Сворачивание не выполнено: {}", e),
            Err(e) => error!("Задача сворачивания аварийно завершилась: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, SwipeError};
    use crate::events::{ForegroundApp, MinimizeReport};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAction {
        calls: AtomicUsize,
        fail: bool,
    }

    impl WindowActionTrait for CountingAction {
        fn minimize_focused_app(&self) -> Result<MinimizeReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SwipeError::NoForegroundApp);
            }
            Ok(MinimizeReport {
                app: ForegroundApp::new(1),
                minimized: 1,
            })
        }
    }

    #[tokio::test]
    async fn test_executor_runs_each_request_once() {
        let action = Arc::new(CountingAction {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let (dispatcher, rx) = ActionDispatcher::channel();
        let executor = ActionExecutor::new(rx, action.clone());

        dispatcher.submit(ActionRequest::MinimizeFocusedApp);
        dispatcher.submit(ActionRequest::MinimizeFocusedApp);
        drop(dispatcher);

        executor.run().await;
        assert_eq!(action.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_executor_survives_action_failure() {
        let action = Arc::new(CountingAction {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let (dispatcher, rx) = ActionDispatcher::channel();
        let executor = ActionExecutor::new(rx, action.clone());

        dispatcher.submit(ActionRequest::MinimizeFocusedApp);
        dispatcher.submit(ActionRequest::MinimizeFocusedApp);
        drop(dispatcher);

        executor.run().await;
        assert_eq!(action.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_submit_to_closed_channel_does_not_panic() {
        let (dispatcher, rx) = ActionDispatcher::channel();
        drop(rx);
        dispatcher.submit(ActionRequest::MinimizeFocusedApp);
    }
}
