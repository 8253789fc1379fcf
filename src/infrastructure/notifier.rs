use chrono::{DateTime, Local};
use tokio::sync::mpsc;

use crate::view::{Notice, Notifier};

#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub raised_at: DateTime<Local>,
}

impl Toast {
    pub fn line(&self) -> String {
        format!(
            "[{}] ! {}",
            self.raised_at.format("%H:%M:%S"),
            self.notice.message()
        )
    }
}

/// Forwards view notices to whatever front end drains the receiver.
#[derive(Clone)]
pub struct ToastNotifier {
    sender: mpsc::UnboundedSender<Toast>,
}

impl ToastNotifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Toast>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        let toast = Toast {
            notice,
            raised_at: Local::now(),
        };
        if self.sender.send(toast).is_err() {
            tracing::warn!(target: "console", ?notice, "toast dropped; no front end listening");
        }
    }
}
