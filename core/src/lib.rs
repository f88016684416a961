// src/lib.rs

//! Pipes: composable, ordered processing pipelines for Rust.
//!
//! A `Pipe` is built from a fixed list of named stages. Handlers are then
//! registered per pipe name and per stage, and running a pipe name folds a
//! single value through those handlers:
//!  - Stages run in the order they were declared, whatever order handlers
//!    were registered in.
//!  - Handlers inside a stage run in registration order.
//!  - A registered action can name another pipe on the same instance, so
//!    pipes compose into larger pipes.
//!  - Handler errors abort the run and reach the caller unchanged.
//!
//! ```
//! use pipes::{Action, Pipe, PipeError};
//!
//! let mut pipe = Pipe::<String, PipeError>::new(["stage1", "stage2", "stage3"])?;
//! pipe.on_map("default", "stage3", |v: String| v + " lamb")?;
//! pipe.on_map("default", "stage1", |v: String| v + " had")?;
//! pipe.on("default", "stage2", Action::map(|v: String| v + " a little"))?;
//!
//! assert_eq!(pipe.run("default", "Mary".to_string())?, "Mary had a little lamb");
//! # Ok::<(), PipeError>(())
//! ```

pub mod core;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

pub use crate::core::action::{Action, Handler, IntoActions};
pub use crate::core::shared::{SharedPipe, WeakSharedPipe};
pub use crate::core::stage::{StageList, DEFAULT_STAGE};

pub use crate::pipeline::definition::{Pipe, DEFAULT_MAX_DELEGATION_DEPTH};

pub use crate::error::{ErrorKind, PipeError, PipeResult};
