//! Use cases for the application layer

pub mod generate_artifact;
pub mod orchestrate_query;
pub mod stream_definition;
pub mod suggest_topic;

#[cfg(test)]
pub(crate) mod test_support;
