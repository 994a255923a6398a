//! Application-level configuration.
//!
//! - [`GenerationParams`] — per-branch call control (attempts, thinking, captions)

pub mod generation_params;

pub use generation_params::{
    ArtifactParams, DefinitionParams, GenerationParams, DEFAULT_MAX_ATTEMPTS,
};
