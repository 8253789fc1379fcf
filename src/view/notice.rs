use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EmptyInput,
    ClassificationFailed,
    UnexpectedError,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::EmptyInput => "Please enter a message to classify",
            Notice::ClassificationFailed => "Failed to classify message. Please try again.",
            Notice::UnexpectedError => "An unexpected error occurred",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Sink for short-lived, non-blocking user notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
