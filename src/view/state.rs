use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::{
    ai::{ClassifierBackend, ClassifyError, FailureChannel},
    domain::ClassificationResult,
    infrastructure::shutdown::Shutdown,
};

use super::{
    keys::KeyEvent,
    notice::{Notice, Notifier},
    render::{RenderModel, render},
};

/// Where the view sits in the `Idle -> Submitting -> Idle*` cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewPhase {
    #[default]
    Idle,
    Submitting,
    Classified,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub input: String,
    pub phase: ViewPhase,
    pub result: Option<ClassificationResult>,
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        self.phase == ViewPhase::Submitting
    }
}

/// Handle to a dispatched classification. Resolves once view state has been
/// settled, or once the call was abandoned because the view or its scope
/// shut down.
pub type Pending = JoinHandle<()>;

pub struct KeyOutcome {
    pub prevent_default: bool,
    pub pending: Option<Pending>,
}

pub struct ClassifierView {
    state: Arc<Mutex<ViewState>>,
    backend: Arc<dyn ClassifierBackend>,
    notifier: Arc<dyn Notifier>,
    lifetime: Shutdown,
}

impl ClassifierView {
    /// Mounts a view inside `scope`. The view's in-flight call is dropped when
    /// either the view is dropped or `scope` shuts down.
    pub fn mount(
        backend: Arc<dyn ClassifierBackend>,
        notifier: Arc<dyn Notifier>,
        scope: &Shutdown,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState::default())),
            backend,
            notifier,
            lifetime: scope.child(),
        }
    }

    pub fn update_input(&self, text: impl Into<String>) {
        let text = text.into();
        let mut state = self.state.lock();
        if state.input != text {
            state.input = text;
        }
    }

    pub fn input(&self) -> String {
        self.state.lock().input.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading()
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.lock().clone()
    }

    pub fn render(&self) -> RenderModel {
        render(&self.state.lock())
    }

    /// Validates the input and, when it is usable, dispatches exactly one
    /// classification call with the untrimmed text.
    pub fn submit(&self) -> Option<Pending> {
        let message = {
            let mut state = self.state.lock();
            if state.is_loading() {
                tracing::debug!(target: "view", "submit ignored while a request is in flight");
                return None;
            }
            if state.input.trim().is_empty() {
                None
            } else {
                state.phase = ViewPhase::Submitting;
                state.result = None;
                Some(state.input.clone())
            }
        };

        let Some(message) = message else {
            self.notifier.notify(Notice::EmptyInput);
            return None;
        };

        tracing::info!(target: "view", chars = message.chars().count(), "dispatching classification");

        let state = Arc::clone(&self.state);
        let backend = Arc::clone(&self.backend);
        let notifier = Arc::clone(&self.notifier);
        let mut lifetime = self.lifetime.subscribe();

        Some(tokio::spawn(async move {
            let outcome = tokio::select! {
                res = backend.classify(&message) => Some(res),
                _ = lifetime.notified() => None,
            };
            match outcome {
                Some(outcome) => settle(&state, notifier.as_ref(), outcome),
                None => {
                    state.lock().phase = ViewPhase::Idle;
                    tracing::debug!(target: "view", "classification abandoned");
                }
            }
        }))
    }

    pub fn handle_key_down(&self, event: KeyEvent) -> KeyOutcome {
        if !event.is_submit_chord() {
            return KeyOutcome {
                prevent_default: false,
                pending: None,
            };
        }
        KeyOutcome {
            prevent_default: true,
            pending: self.submit(),
        }
    }
}

impl Drop for ClassifierView {
    fn drop(&mut self) {
        self.lifetime.trigger();
    }
}

fn settle(
    state: &Mutex<ViewState>,
    notifier: &dyn Notifier,
    outcome: Result<ClassificationResult, ClassifyError>,
) {
    let notice = {
        let mut state = state.lock();
        match outcome {
            Ok(result) => {
                tracing::info!(
                    target: "view",
                    classification = %result.classification,
                    confidence = result.confidence,
                    "message classified"
                );
                state.result = Some(result);
                state.phase = ViewPhase::Classified;
                None
            }
            Err(err) => {
                state.phase = ViewPhase::Failed;
                match err.channel() {
                    FailureChannel::Reported => {
                        tracing::warn!(target: "view", error = %err, "classification error");
                        Some(Notice::ClassificationFailed)
                    }
                    FailureChannel::Unexpected => {
                        tracing::error!(target: "view", error = ?err, "classification call failed");
                        Some(Notice::UnexpectedError)
                    }
                }
            }
        }
    };

    if let Some(notice) = notice {
        notifier.notify(notice);
    }
}
