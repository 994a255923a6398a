//! ASCII-art artifact: value objects, payload parsing and the local fallback.

pub mod entities;
pub mod fallback;
pub mod payload;
