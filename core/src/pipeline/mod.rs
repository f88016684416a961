// pipes/src/pipeline/mod.rs

//! Defines the `Pipe<T, Err>` struct, its construction, registration and execution logic.

pub mod definition;
pub mod execution;
pub mod hooks;

// Re-export the main Pipe struct
pub use definition::{Pipe, DEFAULT_MAX_DELEGATION_DEPTH};
