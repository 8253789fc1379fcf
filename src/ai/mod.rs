pub mod client;
pub mod error;
pub mod inference;

pub use client::{ClassifierBackend, FunctionClient};
pub use error::{ClassifyError, FailureChannel};
