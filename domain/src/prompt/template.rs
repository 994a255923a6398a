//! Prompt templates for the two query branches

/// Symbols the art prompt allows the model to draw with.
pub const ART_PALETTE: &str = "│─┌┐└┘├┤┬┴┼►◄▲▼○●◐◑░▒▓█▀▄■□▪▫★☆♦♠♣♥⟨⟩/\\_|";

/// Templates for generating prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Single-paragraph, plain-prose definition in `language`.
    pub fn definition(topic: &str, language: &str) -> String {
        format!(
            "Provide a concise, single-paragraph encyclopedia-style definition for the term: \"{topic}\". \
Be informative and neutral. Do not use markdown, titles, or any special formatting. \
Respond with only the text of the definition itself. \
The language of the definition must be {language}."
        )
    }

    /// JSON-object request for an ASCII visualization of `topic`.
    ///
    /// With `with_caption` the model is also asked for a blocky `text`
    /// rendering of the topic name.
    pub fn artifact(topic: &str, language: &str, with_caption: bool) -> String {
        let art_part = format!(
            r#"1. "art": a string containing a meta ASCII visualization of the word "{topic}":
  - Palette: {ART_PALETTE}
  - Shape mirrors concept - make the visual form embody the word's essence.
  - Examples: "explosion" -> radiating lines from center; "hierarchy" -> pyramid structure.
  - The "art" string must be a valid JSON string value. This means all backslashes (\) must be escaped (as \\) and all double quotes (") must be escaped (as \"). Use \n for newlines.
  - Any text included in the art must be in {language}."#
        );

        let (keys, text_part) = if with_caption {
            (
                r#"two keys: "art" and "text""#,
                format!(
                    "\n2. \"text\": a short blocky ASCII rendering of the word \"{topic}\" in {language}, following the same escaping rules."
                ),
            )
        } else {
            (r#"one key: "art""#, String::new())
        };

        format!(
            r#"For "{topic}", create a JSON object with {keys}.
{art_part}{text_part}

Return ONLY the raw JSON object. The entire response must be a single, valid JSON object starting with "{{" and ending with "}}"."#
        )
    }

    /// Ask for one random word or two-word concept.
    pub fn random_topic(language: &str) -> String {
        format!(
            "Generate a single, random, interesting word or a two-word concept in the {language} language. \
It can be a noun, verb, adjective, or a proper noun. \
Respond with only the word or concept itself, with no extra text, punctuation, or formatting."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_prompt_names_topic_and_language() {
        let prompt = PromptTemplate::definition("Entropy", "French");
        assert!(prompt.contains("\"Entropy\""));
        assert!(prompt.contains("must be French."));
        assert!(prompt.contains("Do not use markdown"));
    }

    #[test]
    fn artifact_prompt_requests_single_object() {
        let prompt = PromptTemplate::artifact("Spiral", "English", false);
        assert!(prompt.starts_with("For \"Spiral\", create a JSON object with one key: \"art\"."));
        assert!(prompt.contains(ART_PALETTE));
        assert!(prompt.contains("starting with \"{\" and ending with \"}\""));
        assert!(!prompt.contains("\"text\":"));
    }

    #[test]
    fn artifact_prompt_with_caption_adds_text_key() {
        let prompt = PromptTemplate::artifact("Spiral", "German", true);
        assert!(prompt.contains("two keys: \"art\" and \"text\""));
        assert!(prompt.contains("2. \"text\""));
        assert!(prompt.contains("in German"));
    }

    #[test]
    fn random_topic_prompt_mentions_language() {
        assert!(PromptTemplate::random_topic("Japanese").contains("in the Japanese language"));
    }
}
