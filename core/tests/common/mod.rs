// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use pipes::{Action, PipeError};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Value Types ---
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Pipe engine error: {0}")]
  Pipe(String), // Store as String for Eq comparison

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<PipeError> for TestError {
  fn from(pe: PipeError) -> Self {
    // Keeps the "[kind] message" text so tests can match on the code.
    TestError::Pipe(pe.to_string())
  }
}

// --- Common Handler Creators ---
pub fn create_simple_handler(step_name: &'static str, message_to_append: &'static str) -> Action<TestContext, TestError> {
  Action::handler(move |mut ctx: TestContext| {
    ctx.counter += 1;
    ctx.message.push_str(message_to_append);
    ctx.steps_executed.push(step_name.to_string());
    HANDLER_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    tracing::debug!(target: "test_handlers", step = %step_name, "executed, counter: {}, message: '{}'", ctx.counter, ctx.message);
    Ok::<_, TestError>(ctx)
  })
}

pub fn create_failing_handler(step_name: &'static str, error_message: &'static str) -> Action<TestContext, TestError> {
  Action::handler(move |_ctx: TestContext| {
    HANDLER_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    tracing::warn!(target: "test_handlers", step = %step_name, "failing with: '{}'", error_message);
    Err::<TestContext, _>(TestError::Handler(error_message.to_string()))
  })
}

pub fn append(suffix: &'static str) -> Action<String, PipeError> {
  Action::map(move |value: String| value + suffix)
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static HANDLER_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  HANDLER_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

pub fn handler_exec_count() -> usize {
  HANDLER_EXEC_COUNTER.load(Ordering::SeqCst)
}
