//! Toast notifications, published over a broadcast channel.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::events::EventSummary;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(2);
const TOAST_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToastAction {
    /// Re-add a favorite that was just removed.
    UndoRemove(EventSummary),
}

impl ToastAction {
    pub fn label(&self) -> &'static str {
        match self {
            ToastAction::UndoRemove(_) => "Undo",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub sub_message: Option<String>,
    pub action: Option<ToastAction>,
    pub duration: Duration,
}

impl Toast {
    fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            sub_message: None,
            action: None,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn with_sub_message(mut self, sub_message: impl Into<String>) -> Self {
        self.sub_message = Some(sub_message.into());
        self
    }

    pub fn with_action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToastEvent {
    Show(Toast),
    Clear,
}

/// Shown toasts are cleared once their `duration` has passed, unless a
/// newer toast or an explicit clear came first.
#[derive(Debug, Clone)]
pub struct ToastBus {
    sender: broadcast::Sender<ToastEvent>,
    expiry: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Default for ToastBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(TOAST_CHANNEL_CAPACITY);
        Self {
            sender,
            expiry: Arc::new(Mutex::new(None)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.sender.subscribe()
    }

    pub fn show(&self, toast: Toast) {
        let duration = toast.duration;
        self.publish(ToastEvent::Show(toast));
        self.schedule_expiry(duration);
    }

    pub fn clear(&self) {
        self.cancel_expiry();
        self.publish(ToastEvent::Clear);
    }

    fn schedule_expiry(&self, duration: Duration) {
        let mut expiry = self.expiry.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = expiry.take() {
            handle.abort();
        }
        // Outside a runtime toasts simply stay until cleared.
        let Ok(runtime) = Handle::try_current() else {
            return;
        };
        let sender = self.sender.clone();
        *expiry = Some(runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = sender.send(ToastEvent::Clear);
        }));
    }

    fn cancel_expiry(&self) {
        let mut expiry = self.expiry.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = expiry.take() {
            handle.abort();
        }
    }

    fn publish(&self, event: ToastEvent) {
        // No subscribers is fine, nobody is looking.
        if self.sender.send(event).is_err() {
            debug!("Toast dropped, no subscribers");
        }
    }
}
