//! Core types and utilities

pub mod jitter;
pub mod params;
pub mod random;

pub use jitter::{apply_jitter, JitterPolicy};
pub use params::*;
pub use random::{random_identifier, uniform, IDENTIFIER_ALPHABET};
