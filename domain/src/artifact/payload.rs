//! Artifact payload extraction from raw model output.
//!
//! The model is asked for a bare JSON object but may still wrap it in a
//! Markdown fence. Everything that does not reduce to an object with a
//! non-empty `art` string is a [`DomainError::MalformedPayload`].

use super::entities::ArtifactResult;
use crate::core::error::DomainError;
use serde_json::Value;

/// Parse a gateway response into an artifact.
///
/// With `keep_caption`, a `text` (or `caption`) string field is kept as the
/// caption; otherwise it is dropped.
pub fn parse_artifact_payload(raw: &str, keep_caption: bool) -> Result<ArtifactResult, DomainError> {
    let trimmed = raw.trim();
    let json = strip_code_fence(trimmed);

    if !json.starts_with('{') || !json.ends_with('}') {
        return Err(DomainError::MalformedPayload(
            "response is not a JSON object".to_string(),
        ));
    }

    let value: Value = serde_json::from_str(json)
        .map_err(|e| DomainError::MalformedPayload(format!("invalid JSON: {}", e)))?;

    let art = match value.get("art") {
        Some(Value::String(art)) if !art.trim().is_empty() => art.clone(),
        Some(Value::String(_)) => {
            return Err(DomainError::MalformedPayload(
                "empty ASCII art in response".to_string(),
            ));
        }
        _ => {
            return Err(DomainError::MalformedPayload(
                "missing \"art\" string field".to_string(),
            ));
        }
    };

    let caption = if keep_caption {
        ["text", "caption"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    } else {
        None
    };

    Ok(ArtifactResult::generated(art, caption))
}

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner).trim();
    if inner.is_empty() { text } else { inner }
}
