// pipes/src/core/shared.rs
use crate::core::action::IntoActions;
use crate::error::{PipeError, PipeResult};
use crate::pipeline::definition::Pipe;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::{Arc, Weak};

/// A `Pipe` behind shared ownership and a `parking_lot::RwLock`, for hosts
/// that register and run from more than one thread.
///
/// Registration takes the write lock and execution takes a recursive read
/// lock, so a registration never interleaves with a run in progress.
///
/// IMPORTANT: handlers MUST NOT call `on` (or `write`) on the same
/// `SharedPipe` they are running under. That needs the write lock while the
/// read lock is held and will deadlock. Calling `run` from a handler is fine.
///
/// A handler that captures a clone of the `SharedPipe` it is registered on
/// forms an `Arc` cycle, and the pipe is never freed. Capture a
/// `WeakSharedPipe` from `downgrade` instead.
pub struct SharedPipe<T, Err = PipeError>(Arc<RwLock<Pipe<T, Err>>>)
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static;

impl<T, Err> SharedPipe<T, Err>
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static,
{
  pub fn new(pipe: Pipe<T, Err>) -> Self {
    SharedPipe(Arc::new(RwLock::new(pipe)))
  }

  /// Acquires a read lock for inspection.
  pub fn read(&self) -> RwLockReadGuard<'_, Pipe<T, Err>> {
    self.0.read()
  }

  /// Acquires a write lock for registration.
  pub fn write(&self) -> RwLockWriteGuard<'_, Pipe<T, Err>> {
    self.0.write()
  }

  /// Attempts to acquire a read lock without blocking.
  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, Pipe<T, Err>>> {
    self.0.try_read()
  }

  /// Attempts to acquire a write lock without blocking.
  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, Pipe<T, Err>>> {
    self.0.try_write()
  }

  /// A handle that does not keep the pipe alive.
  pub fn downgrade(&self) -> WeakSharedPipe<T, Err> {
    WeakSharedPipe(Arc::downgrade(&self.0))
  }

  /// `Pipe::on` under the write lock.
  pub fn on<A>(&self, pipe_name: &str, stage_name: &str, actions: A) -> PipeResult<()>
  where
    A: IntoActions<T, Err>,
  {
    self.0.write().on(pipe_name, stage_name, actions)
  }

  /// `Pipe::run` under a read lock.
  ///
  /// The lock is taken recursively so a handler may run another pipe name on
  /// this same `SharedPipe` even while a writer is queued.
  pub fn run(&self, pipe_name: &str, value: T) -> Result<T, Err> {
    self.0.read_recursive().run(pipe_name, value)
  }
}

impl<T, Err> Clone for SharedPipe<T, Err>
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    SharedPipe(Arc::clone(&self.0))
  }
}

impl<T, Err> From<Pipe<T, Err>> for SharedPipe<T, Err>
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static,
{
  fn from(pipe: Pipe<T, Err>) -> Self {
    Self::new(pipe)
  }
}

/// Non-owning handle to a `SharedPipe`, for handlers that run sibling pipe
/// names on the instance they are registered on.
pub struct WeakSharedPipe<T, Err = PipeError>(Weak<RwLock<Pipe<T, Err>>>)
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static;

impl<T, Err> WeakSharedPipe<T, Err>
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static,
{
  /// `None` once every `SharedPipe` for this instance has been dropped.
  pub fn upgrade(&self) -> Option<SharedPipe<T, Err>> {
    self.0.upgrade().map(SharedPipe)
  }

  /// `SharedPipe::run`, or `InvalidPipeName` (as `Err`) if the pipe is gone.
  pub fn run(&self, pipe_name: &str, value: T) -> Result<T, Err> {
    match self.upgrade() {
      Some(shared) => shared.run(pipe_name, value),
      None => Err(Err::from(PipeError::InvalidPipeName {
        pipe_name: pipe_name.to_string(),
      })),
    }
  }
}

impl<T, Err> Clone for WeakSharedPipe<T, Err>
where
  T: 'static,
  Err: std::error::Error + From<PipeError> + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    WeakSharedPipe(Weak::clone(&self.0))
  }
}
