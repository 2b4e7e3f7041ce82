//! # Runtime Compatibility Helpers

pub mod threads;
pub mod traits;
