use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::domain::ClassificationResult;

use super::error::ClassifyError;

const MAX_DETAIL_LEN: usize = 512;

/// Resolves `{base}/functions/v1/{name}`, keeping any path prefix on the base.
pub fn function_url(base: &Url, function_name: &str) -> Option<Url> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments
            .pop_if_empty()
            .extend(["functions", "v1", function_name]);
    }
    url.set_query(None);
    url.set_fragment(None);
    Some(url)
}

pub fn parse_response(status: StatusCode, body: &str) -> Result<ClassificationResult, ClassifyError> {
    let payload: Option<Value> = serde_json::from_str(body).ok();

    if !status.is_success() {
        let detail = payload
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| truncate(body));
        return Err(ClassifyError::Status { status, detail });
    }

    let payload = payload
        .ok_or_else(|| ClassifyError::Malformed(format!("body is not JSON: {}", truncate(body))))?;

    if let Some(message) = error_message(&payload) {
        return Err(ClassifyError::Reported(message));
    }

    let result: ClassificationResult = serde_json::from_value(payload)
        .map_err(|err| ClassifyError::Malformed(err.to_string()))?;
    result.check_confidence().map_err(ClassifyError::Malformed)?;
    Ok(result)
}

/// Only a string `error`, or an object carrying a string `message`, counts.
fn error_message(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= MAX_DETAIL_LEN {
        return trimmed.to_string();
    }
    let mut end = MAX_DETAIL_LEN;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &trimmed[..end])
}
