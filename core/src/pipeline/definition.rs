// pipes/src/pipeline/definition.rs

//! Contains the `Pipe<T, Err>` struct definition, its construction, and
//! read-only inspection of its stage list and action table.

use crate::core::action::Action;
use crate::core::stage::StageList;
use crate::error::{PipeError, PipeResult};
use std::collections::HashMap;
use tracing::{event, Level};

/// Nesting bound for delegations within one `run`, unless overridden with
/// `Pipe::with_max_delegation_depth`.
pub const DEFAULT_MAX_DELEGATION_DEPTH: usize = 256;

/// Stage name -> handlers for one pipe name, in registration order.
pub(crate) type StagedActions<T, Err> = HashMap<String, Vec<Action<T, Err>>>;

/// The pipeline engine, generic over the value `T` threaded through the
/// handlers and the error type `Err` those handlers return.
///
/// `Err` must be `From<PipeError>` so engine faults raised during `run`
/// (unknown pipe name, runaway delegation) can be surfaced as `Err`.
pub struct Pipe<T, Err = PipeError>
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static,
{
  /// Execution order shared by every pipe name on this instance.
  pub(crate) stages: StageList,

  /// Pipe name -> stage name -> handlers. Grows monotonically.
  pub(crate) actions: HashMap<String, StagedActions<T, Err>>,

  /// Delegations nested deeper than this fail with `CyclicDelegation`.
  pub(crate) max_delegation_depth: usize,
}

impl<T, Err> Pipe<T, Err>
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static,
{
  /// Creates a `Pipe` with the given stage names, in execution order.
  ///
  /// Arrays, slices of owned names, vectors and iterators are all accepted;
  /// see also the `pipe!` macro for the variadic spelling.
  pub fn new<I, S>(stage_names: I) -> PipeResult<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let stages = StageList::new(stage_names)?;
    event!(Level::DEBUG, stages = ?stages.as_slice(), "Pipe created.");
    Ok(Self::from_stages(stages))
  }

  /// Creates a flat pipe: one implicit stage, `DEFAULT_STAGE`.
  /// Register on it with `on_flat`.
  pub fn flat() -> Self {
    Self::from_stages(StageList::single_default())
  }

  /// Creates a `Pipe` from an already validated stage list.
  pub fn from_stages(stages: StageList) -> Self {
    Self {
      stages,
      actions: HashMap::new(),
      max_delegation_depth: DEFAULT_MAX_DELEGATION_DEPTH,
    }
  }

  /// Sets how many delegations may be nested inside one `run`. `0` forbids
  /// delegation altogether.
  ///
  /// Every nested delegation is a native stack frame, so keep the bound well
  /// below what the running thread's stack can hold.
  pub fn with_max_delegation_depth(mut self, max_depth: usize) -> Self {
    self.max_delegation_depth = max_depth;
    self
  }

  pub fn max_delegation_depth(&self) -> usize {
    self.max_delegation_depth
  }

  // --- Inspection ---

  /// Stage names in execution order.
  pub fn stages(&self) -> &[String] {
    self.stages.as_slice()
  }

  pub fn stage_list(&self) -> &StageList {
    &self.stages
  }

  pub fn has_stage(&self, stage_name: &str) -> bool {
    self.stages.contains(stage_name)
  }

  /// True once `pipe_name` has been passed to a successful `on` call.
  pub fn has_pipe(&self, pipe_name: &str) -> bool {
    self.actions.contains_key(pipe_name)
  }

  /// Known pipe names, sorted.
  pub fn pipe_names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }

  /// Handlers registered for `(pipe_name, stage_name)`, in registration order.
  pub fn actions_for(&self, pipe_name: &str, stage_name: &str) -> Option<&[Action<T, Err>]> {
    self
      .actions
      .get(pipe_name)
      .and_then(|staged| staged.get(stage_name))
      .map(Vec::as_slice)
  }

  pub fn handler_count(&self, pipe_name: &str, stage_name: &str) -> usize {
    self.actions_for(pipe_name, stage_name).map_or(0, <[_]>::len)
  }
}

impl<T, Err> std::fmt::Debug for Pipe<T, Err>
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipe")
      .field("stages", &self.stages.as_slice())
      .field("pipe_names", &self.pipe_names())
      .field("max_delegation_depth", &self.max_delegation_depth)
      .finish()
  }
}

/// Builds a `Pipe` from stage names given as separate arguments.
///
/// `pipe!["before", "action", "after"]` is the same as
/// `Pipe::new(["before", "action", "after"])`, and `pipe![]` fails with
/// `InvalidArguments` just like an empty list does.
#[macro_export]
macro_rules! pipe {
  () => {
    $crate::Pipe::new(::std::vec::Vec::<::std::string::String>::new())
  };
  ($($stage:expr),+ $(,)?) => {
    $crate::Pipe::new([$(::std::string::String::from($stage)),+])
  };
}
