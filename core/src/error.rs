// pipes/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Machine-readable fault kind. Callers branch on this rather than on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  InvalidArguments,
  DuplicateStageNames,
  InvalidStageName,
  InvalidAction,
  InvalidPipeName,
  CyclicDelegation,
  HandlerError,
}

impl ErrorKind {
  /// Stable short code, e.g. `"invalid-stagename"`.
  pub fn code(&self) -> &'static str {
    match self {
      ErrorKind::InvalidArguments => "invalid-arguments",
      ErrorKind::DuplicateStageNames => "duplicate-stagenames",
      ErrorKind::InvalidStageName => "invalid-stagename",
      ErrorKind::InvalidAction => "invalid-action",
      ErrorKind::InvalidPipeName => "invalid-pipename",
      ErrorKind::CyclicDelegation => "cyclic-delegation",
      ErrorKind::HandlerError => "handler-error",
    }
  }
}

impl std::fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.code())
  }
}

#[derive(Debug, Error)]
pub enum PipeError {
  #[error("[invalid-arguments] {message}")]
  InvalidArguments { message: String },

  #[error("[duplicate-stagenames] stage names must be unique, '{stage_name}' appears more than once")]
  DuplicateStageNames { stage_name: String },

  #[error("[invalid-stagename] stage '{stage_name}' is not defined")]
  InvalidStageName { stage_name: String },

  /// Every `Action` is well formed by construction, so registration never
  /// raises this. It keeps the code available to callers that validate
  /// actions built from untyped input.
  #[error("[invalid-action] action for pipe '{pipe_name}' in stage '{stage_name}': {message}")]
  InvalidAction {
    pipe_name: String,
    stage_name: String,
    message: String,
  },

  #[error("[invalid-pipename] pipe '{pipe_name}' does not exist or is not a valid name")]
  InvalidPipeName { pipe_name: String },

  #[error("[cyclic-delegation] delegation into pipe '{pipe_name}' exceeds the depth limit of {max_depth} (chain: {chain})")]
  CyclicDelegation {
    pipe_name: String,
    max_depth: usize,
    chain: String,
  },

  #[error("[handler-error] {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },
}

impl PipeError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      PipeError::InvalidArguments { .. } => ErrorKind::InvalidArguments,
      PipeError::DuplicateStageNames { .. } => ErrorKind::DuplicateStageNames,
      PipeError::InvalidStageName { .. } => ErrorKind::InvalidStageName,
      PipeError::InvalidAction { .. } => ErrorKind::InvalidAction,
      PipeError::InvalidPipeName { .. } => ErrorKind::InvalidPipeName,
      PipeError::CyclicDelegation { .. } => ErrorKind::CyclicDelegation,
      PipeError::HandlerError { .. } => ErrorKind::HandlerError,
    }
  }
}

// Lets handlers on a `Pipe<T, PipeError>` use `?` on arbitrary errors.
impl From<AnyhowError> for PipeError {
  fn from(err: AnyhowError) -> Self {
    // Don't bury an engine fault that was bounced through anyhow.
    match err.downcast::<PipeError>() {
      Ok(pipe_err) => pipe_err,
      Err(err) => PipeError::HandlerError { source: err },
    }
  }
}

pub type PipeResult<T, E = PipeError> = std::result::Result<T, E>;
