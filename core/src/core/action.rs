// pipes/src/core/action.rs

//! Defines the `Handler<T, Err>` type and the `Action<T, Err>` variant stored
//! in a pipe's action table.

// --- Handler Definition ---

/// Type alias for a registered handler.
///
/// A handler takes ownership of the in-flight value and returns the value
/// handed to the next handler, or an error that aborts the run.
pub type Handler<T, Err> = Box<dyn Fn(T) -> Result<T, Err> + Send + Sync>;

/// One entry in a stage bucket.
pub enum Action<T, Err> {
  /// Transforms the value directly.
  Handler(Handler<T, Err>),
  /// Runs another pipe name on the same instance with the in-flight value and
  /// uses its result. Resolved when executed, not when registered.
  Delegate(String),
}

impl<T: 'static, Err: 'static> Action<T, Err> {
  /// Wraps a fallible closure. The closure's error only needs to convert into `Err`.
  pub fn handler<F, UserErr>(handler_fn: F) -> Self
  where
    F: Fn(T) -> Result<T, UserErr> + Send + Sync + 'static,
    UserErr: Into<Err> + 'static,
  {
    Action::Handler(Box::new(move |value| handler_fn(value).map_err(Into::into)))
  }

  /// Wraps an infallible transform.
  pub fn map<F>(map_fn: F) -> Self
  where
    F: Fn(T) -> T + Send + Sync + 'static,
  {
    Action::Handler(Box::new(move |value| Ok(map_fn(value))))
  }

  pub fn delegate<S: Into<String>>(pipe_name: S) -> Self {
    Action::Delegate(pipe_name.into())
  }
}

impl<T, Err> Action<T, Err> {
  pub fn is_delegate(&self) -> bool {
    matches!(self, Action::Delegate(_))
  }

  /// The pipe name this action delegates to, if it is a delegation.
  pub fn delegate_target(&self) -> Option<&str> {
    match self {
      Action::Delegate(target) => Some(target.as_str()),
      Action::Handler(_) => None,
    }
  }
}

// Closures don't implement Debug, so print the variant and the target only.
impl<T, Err> std::fmt::Debug for Action<T, Err> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Action::Handler(_) => f.write_str("Action::Handler(..)"),
      Action::Delegate(target) => f.debug_tuple("Action::Delegate").field(target).finish(),
    }
  }
}

impl<T, Err> From<&str> for Action<T, Err> {
  fn from(pipe_name: &str) -> Self {
    Action::Delegate(pipe_name.to_string())
  }
}

impl<T, Err> From<String> for Action<T, Err> {
  fn from(pipe_name: String) -> Self {
    Action::Delegate(pipe_name)
  }
}

/// Anything `Pipe::on` accepts: one action, a delegation name, or an ordered
/// sequence of actions.
pub trait IntoActions<T, Err> {
  fn into_actions(self) -> Vec<Action<T, Err>>;
}

impl<T, Err> IntoActions<T, Err> for Action<T, Err> {
  fn into_actions(self) -> Vec<Action<T, Err>> {
    vec![self]
  }
}

impl<T, Err> IntoActions<T, Err> for Vec<Action<T, Err>> {
  fn into_actions(self) -> Vec<Action<T, Err>> {
    self
  }
}

impl<T, Err, const N: usize> IntoActions<T, Err> for [Action<T, Err>; N] {
  fn into_actions(self) -> Vec<Action<T, Err>> {
    self.into_iter().collect()
  }
}

impl<T, Err> IntoActions<T, Err> for &str {
  fn into_actions(self) -> Vec<Action<T, Err>> {
    vec![Action::from(self)]
  }
}

impl<T, Err> IntoActions<T, Err> for String {
  fn into_actions(self) -> Vec<Action<T, Err>> {
    vec![Action::from(self)]
  }
}
