//! Locally synthesized placeholder artifact.
//!
//! Used when every gateway attempt failed. Built purely from the topic so
//! it is deterministic and needs no network.

use super::entities::{ArtifactResult, ArtifactSource};

/// Topics longer than this many characters get truncated.
pub const FALLBACK_TRUNCATE_ABOVE: usize = 20;

/// Characters kept from a truncated topic, before the ellipsis.
pub const FALLBACK_KEEP_CHARS: usize = 17;

/// Draw a 3-line box around the (possibly truncated) topic.
///
/// ```
/// use wiki_domain::artifact::fallback::fallback_artifact;
///
/// let art = fallback_artifact("Hi").art;
/// assert_eq!(art, "┌────┐\n│ Hi │\n└────┘");
/// ```
pub fn fallback_artifact(topic: &str) -> ArtifactResult {
    let label = displayable_topic(topic);
    let padded = format!(" {} ", label);
    let width = padded.chars().count();
    let rule = "─".repeat(width);

    ArtifactResult {
        art: format!("┌{rule}┐\n│{padded}│\n└{rule}┘"),
        caption: None,
        source: ArtifactSource::Fallback,
    }
}

fn displayable_topic(topic: &str) -> String {
    if topic.chars().count() > FALLBACK_TRUNCATE_ABOVE {
        let kept: String = topic.chars().take(FALLBACK_KEEP_CHARS).collect();
        format!("{}...", kept)
    } else {
        topic.to_string()
    }
}
