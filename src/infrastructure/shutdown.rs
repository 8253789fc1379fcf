use tokio::sync::watch;

#[derive(Clone)]
pub struct Shutdown {
    sender: watch::Sender<bool>,
}

#[derive(Clone)]
pub struct ShutdownListener {
    receiver: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> (Self, ShutdownListener) {
        let (sender, receiver) = watch::channel(false);
        (Self { sender }, ShutdownListener { receiver })
    }

    /// A narrower scope that fires on its own trigger or when `self` fires.
    /// Must be called from inside a tokio runtime.
    pub fn child(&self) -> Shutdown {
        let (child, mut child_listener) = Shutdown::new();
        let mut parent = self.subscribe();
        let forward = child.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = parent.notified() => forward.trigger(),
                _ = child_listener.notified() => {}
            }
        });
        child
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn trigger(&self) {
        let _ = self.sender.send(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }
}

impl ShutdownListener {
    pub async fn notified(&mut self) {
        if *self.receiver.borrow() {
            return;
        }
        let _ = self.receiver.changed().await;
    }

    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }
}

pub fn install_signal_handlers(shutdown: Shutdown) {
    let ctrlc = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrlc.trigger();
        }
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let term = shutdown.clone();
        tokio::spawn(async move {
            if let Ok(mut sig) = signal(SignalKind::terminate()) {
                sig.recv().await;
                term.trigger();
            }
        });
    }
}
