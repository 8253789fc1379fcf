pub mod message;
pub mod types;

pub use message::ClassifyRequest;
pub use types::{Classification, ClassificationResult};
