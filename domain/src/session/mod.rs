//! Gateway session primitives shared by the adapters and use cases.

pub mod stream;
