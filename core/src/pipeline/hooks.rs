// pipes/src/pipeline/hooks.rs

//! Contains the registration methods that append actions to a pipe's
//! stage buckets. Registration is additive only.

use tracing::{event, instrument, Level};

use crate::core::action::{Action, IntoActions};
use crate::core::stage::DEFAULT_STAGE;
use crate::error::{PipeError, PipeResult};
use crate::pipeline::definition::Pipe;

impl<T, Err> Pipe<T, Err>
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static,
{
  /// Appends `actions` to the end of the `(pipe_name, stage_name)` bucket.
  ///
  /// `actions` may be a single `Action`, a pipe name to delegate to, or an
  /// ordered sequence of actions, appended in the given order. Any string is
  /// accepted as a delegation target; it is resolved only when `run` reaches it.
  ///
  /// The pipe name becomes known to `run` as soon as the stage name checks
  /// out, even if `actions` turns out to be empty.
  #[instrument(
        name = "Pipe::on",
        skip_all,
        fields(pipe_name = %pipe_name, stage_name = %stage_name),
        err(Display)
    )]
  pub fn on<A>(&mut self, pipe_name: &str, stage_name: &str, actions: A) -> PipeResult<()>
  where
    A: IntoActions<T, Err>,
  {
    if !self.stages.contains(stage_name) {
      event!(Level::ERROR, "Stage is not defined on this pipe.");
      return Err(PipeError::InvalidStageName {
        stage_name: stage_name.to_string(),
      });
    }

    let bucket = self
      .actions
      .entry(pipe_name.to_string())
      .or_default()
      .entry(stage_name.to_string())
      .or_default();

    for (action_index, action) in actions.into_actions().into_iter().enumerate() {
      event!(Level::TRACE, action_index, delegate_to = ?action.delegate_target(), "Appending action.");
      bucket.push(action);
    }

    event!(Level::DEBUG, stage_handlers = bucket.len(), "Actions registered.");
    Ok(())
  }

  /// Registers a fallible closure. The closure's error only needs to convert
  /// into the pipe's `Err`.
  pub fn on_handler<F, UserProvidedErr>(
    &mut self,
    pipe_name: &str,
    stage_name: &str,
    handler_fn: F,
  ) -> PipeResult<()>
  where
    F: Fn(T) -> Result<T, UserProvidedErr> + Send + Sync + 'static,
    UserProvidedErr: Into<Err> + 'static,
  {
    self.on(pipe_name, stage_name, Action::handler(handler_fn))
  }

  /// Registers an infallible transform.
  pub fn on_map<F>(&mut self, pipe_name: &str, stage_name: &str, map_fn: F) -> PipeResult<()>
  where
    F: Fn(T) -> T + Send + Sync + 'static,
  {
    self.on(pipe_name, stage_name, Action::map(map_fn))
  }

  /// Registers a delegation to another pipe name on this instance.
  pub fn on_delegate(&mut self, pipe_name: &str, stage_name: &str, target_pipe: &str) -> PipeResult<()> {
    self.on(pipe_name, stage_name, Action::delegate(target_pipe))
  }

  /// Registers on `DEFAULT_STAGE`, the single stage of a flat pipe.
  ///
  /// On a staged pipe this fails with `InvalidStageName` unless one of its
  /// stages happens to be named `DEFAULT_STAGE`.
  pub fn on_flat<A>(&mut self, pipe_name: &str, actions: A) -> PipeResult<()>
  where
    A: IntoActions<T, Err>,
  {
    self.on(pipe_name, DEFAULT_STAGE, actions)
  }
}
