// pipes/src/pipeline/execution.rs

//! Contains the `Pipe::run()` method, which folds a value through every
//! handler registered for a pipe name, in stage order.

use crate::core::action::Action;
use crate::error::PipeError;
use crate::pipeline::definition::Pipe;
use tracing::{event, instrument, span, Level};

impl<T, Err> Pipe<T, Err>
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static,
{
  /// Runs every handler registered for `pipe_name` and returns the final value.
  ///
  /// Stages run in the order given at construction, handlers within a stage
  /// in registration order. Each handler receives the value returned by the
  /// one before it. A stage with no handlers for this pipe name is skipped.
  ///
  /// A delegation runs the target pipe name's full stage sequence with the
  /// in-flight value and continues with its result.
  ///
  /// Errors:
  /// - `InvalidPipeName` (as `Err`) if `pipe_name` was never registered,
  ///   including when reached through a delegation.
  /// - `CyclicDelegation` (as `Err`) if nested delegations go deeper than
  ///   `max_delegation_depth()`. A pipe may delegate to itself; the bound only
  ///   stops recursion that no handler ends.
  /// - Any handler error, returned unchanged. Nothing after the failing
  ///   handler runs.
  #[instrument(
        name = "Pipe::run",
        skip_all,
        fields(
            pipe_name = %pipe_name,
            value_type = %std::any::type_name::<T>(),
            num_stages = self.stages.len(),
        ),
        err(Display)
    )]
  pub fn run(&self, pipe_name: &str, value: T) -> Result<T, Err> {
    event!(Level::DEBUG, "Pipe execution starting.");
    let mut chain = Vec::new();
    let result = self.run_in_chain(pipe_name, value, &mut chain)?;
    event!(Level::DEBUG, "Pipe execution completed successfully.");
    Ok(result)
  }

  /// `chain` holds the pipe names currently executing, outermost first. Its
  /// length is the number of delegations between `run` and this call.
  fn run_in_chain<'a>(&'a self, pipe_name: &'a str, value: T, chain: &mut Vec<&'a str>) -> Result<T, Err> {
    let staged = match self.actions.get(pipe_name) {
      Some(staged) => staged,
      _ => {
        event!(Level::ERROR, %pipe_name, "Pipe name is not registered.");
        return Err(Err::from(PipeError::InvalidPipeName {
          pipe_name: pipe_name.to_string(),
        }));
      }
    };

    // The outermost run is not a delegation.
    if chain.len() > self.max_delegation_depth {
      let mut names = chain.clone();
      names.push(pipe_name);
      let chain_text = names.join(" -> ");
      event!(
        Level::ERROR,
        %pipe_name,
        max_depth = self.max_delegation_depth,
        "Delegation depth limit exceeded."
      );
      return Err(Err::from(PipeError::CyclicDelegation {
        pipe_name: pipe_name.to_string(),
        max_depth: self.max_delegation_depth,
        chain: chain_text,
      }));
    }
    chain.push(pipe_name);

    let mut value = value;
    for (stage_index, stage_name) in self.stages.iter().enumerate() {
      let actions = match staged.get(stage_name) {
        Some(actions) if !actions.is_empty() => actions,
        _ => {
          event!(Level::TRACE, stage_name, "Empty stage, skipping.");
          continue;
        }
      };

      let stage_span = span!(
        Level::DEBUG,
        "pipe_stage_execution",
        pipe_name = pipe_name,
        stage_name = stage_name,
        stage_index = stage_index
      );
      let _stage_span_guard = stage_span.enter();
      event!(Level::TRACE, handlers = actions.len(), "Processing stage.");

      for (action_index, action) in actions.iter().enumerate() {
        value = match action {
          Action::Handler(handler_fn) => {
            event!(Level::TRACE, action_index, "Invoking handler.");
            match handler_fn(value) {
              Ok(next) => next,
              Err(e) => {
                event!(Level::ERROR, action_index, error = %e, "Handler failed.");
                return Err(e);
              }
            }
          }
          Action::Delegate(target) => {
            let delegate_span = span!(Level::DEBUG, "delegation", delegate_to = %target, action_index = action_index);
            let _delegate_span_guard = delegate_span.enter();
            self.run_in_chain(target.as_str(), value, chain)?
          }
        };
      }
    }

    chain.pop();
    Ok(value)
  }
}
