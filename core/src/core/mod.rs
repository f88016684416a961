pub mod action;
pub mod shared;
pub mod stage;

// Re-export key types for easier access from other modules (and lib.rs)
pub use action::{Action, Handler, IntoActions};
pub use shared::{SharedPipe, WeakSharedPipe};
pub use stage::{StageList, DEFAULT_STAGE};
