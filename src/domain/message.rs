use serde::Serialize;

/// Body sent to the classification function. The message is the raw input,
/// whitespace included.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyRequest<'a> {
    pub message: &'a str,
}
