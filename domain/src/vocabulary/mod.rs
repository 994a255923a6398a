//! Static word lists: curated random topics and supported languages.

pub mod languages;
pub mod topics;

pub use languages::{DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES, canonical_language};
pub use topics::{curated_topics, pick_random_topic};
