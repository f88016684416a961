// pipes/examples/error_handling.rs

use pipes::{ErrorKind, Pipe, PipeError};
use tracing::{error, info};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("A custom application error occurred: {0}")]
  CustomError(String),

  #[error("Pipe engine error during execution: {0}")]
  PipeFramework(#[from] PipeError), // Allows PipeError to be converted into ExampleAppError
}

// 2. Define the value threaded through the pipe
#[derive(Clone, Debug, Default)]
struct ErrorContext {
  processed_steps: Vec<String>,
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: Handler returns a custom error
  info!("\nScenario 1: Handler returns a custom error");
  run_pipe_with_handler_error();

  // Scenario 2: Engine error (unknown pipe name, reached through a delegation)
  info!("\nScenario 2: Engine error (InvalidPipeName)");
  run_pipe_with_engine_error();

  // Scenario 3: Registration errors are reported immediately as PipeError
  info!("\nScenario 3: Registration errors");
  run_registration_errors();
}

fn record(step: &'static str) -> impl Fn(ErrorContext) -> ErrorContext + Send + Sync + 'static {
  move |mut ctx: ErrorContext| {
    info!("Executing {}", step);
    ctx.processed_steps.push(step.to_string());
    ctx
  }
}

fn run_pipe_with_handler_error() {
  let mut pipe = Pipe::<ErrorContext, ExampleAppError>::new(["step_one", "step_two", "step_three"])
    .expect("stage names are valid");

  pipe.on_map("main", "step_one", record("step_one")).expect("stage exists");
  pipe
    .on_handler("main", "step_two", |ctx: ErrorContext| {
      info!("Executing step_two - this will error after {:?}", ctx.processed_steps);
      Err::<ErrorContext, _>(ExampleAppError::CustomError(
        "Something went wrong in step_two!".to_string(),
      ))
    })
    .expect("stage exists");
  pipe.on_map("main", "step_three", record("step_three")).expect("stage exists"); // Should not run

  match pipe.run("main", ErrorContext::default()) {
    Ok(ctx) => error!("Pipe unexpectedly succeeded: {:?}", ctx),
    Err(ExampleAppError::CustomError(msg)) => {
      info!("Pipe failed as expected: {}", msg);
      assert!(msg.contains("Something went wrong in step_two!"));
    }
    Err(e) => error!("Unexpected error type: {:?}", e),
  }
}

fn run_pipe_with_engine_error() {
  let mut pipe = Pipe::<ErrorContext, ExampleAppError>::new(["step_alpha", "step_beta"])
    .expect("stage names are valid");

  pipe.on_map("main", "step_alpha", record("step_alpha")).expect("stage exists");
  // "helpers" is never registered, so the delegation fails when reached.
  pipe.on_delegate("main", "step_beta", "helpers").expect("stage exists");

  match pipe.run("main", ErrorContext::default()) {
    Err(ExampleAppError::PipeFramework(pipe_err)) => {
      info!("Wrapped PipeError: {}", pipe_err);
      assert_eq!(pipe_err.kind(), ErrorKind::InvalidPipeName);
    }
    Err(e) => error!("Expected InvalidPipeName, got {:?}", e),
    Ok(_) => error!("Expected InvalidPipeName, but pipe completed"),
  }
}

fn run_registration_errors() {
  match Pipe::<ErrorContext, ExampleAppError>::new(["same", "same"]) {
    Err(e) => info!("Construction rejected with kind '{}': {}", e.kind(), e),
    Ok(_) => error!("Duplicate stage names were accepted"),
  }

  let mut pipe = Pipe::<ErrorContext, ExampleAppError>::flat();
  match pipe.on_map("main", "no_such_stage", record("never")) {
    Err(e) => info!("Registration rejected with kind '{}': {}", e.kind(), e),
    Ok(()) => error!("Unknown stage name was accepted"),
  }
}
