use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Spam,
    NotSpam,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Spam => "spam",
            Classification::NotSpam => "not_spam",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict returned by the remote classifier for a single message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub classification: Classification,
    pub confidence: f64,
    pub reason: String,
}

impl ClassificationResult {
    /// Rejects confidences that are not finite or fall outside `[0, 1]`.
    pub fn check_confidence(&self) -> Result<(), String> {
        if !self.confidence.is_finite() {
            return Err(format!("confidence is not finite: {}", self.confidence));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence out of range: {}", self.confidence));
        }
        Ok(())
    }

    pub fn confidence_percent(&self) -> i64 {
        (self.confidence * 100.0).round() as i64
    }
}
