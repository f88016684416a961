// pipes/examples/basic_pipeline.rs

use pipes::{Pipe, PipeError};
use tracing::info;

// 1. Define the value threaded through the pipe
#[derive(Clone, Debug, Default)]
struct BasicContext {
  message_log: Vec<String>,
  counter: i32,
}

// 2. This example uses PipeError directly for its handlers.
//    In real applications, you'd typically define a custom error:
//    #[derive(Debug, thiserror::Error)]
//    enum MyError { #[error("pipe: {0}")] Pipe(#[from] PipeError), /* ... */ }

fn main() -> Result<(), PipeError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipe Example ---");

  // 3. Declare the stages. Their order is the execution order.
  let mut pipe = Pipe::<BasicContext, PipeError>::new(["before", "action", "after"])?;

  // 4. Register handlers. Registration order across stages does not matter.
  pipe.on_map("counter", "after", |mut data: BasicContext| {
    data.counter -= 1;
    let msg = format!("after executed: counter = {}", data.counter);
    info!("{}", msg);
    data.message_log.push(msg);
    data
  })?;

  pipe.on_map("counter", "before", |mut data: BasicContext| {
    data.counter += 1;
    let msg = format!("before executed: counter = {}", data.counter);
    info!("{}", msg);
    data.message_log.push(msg);
    data
  })?;

  pipe.on_map("counter", "action", |mut data: BasicContext| {
    data.counter *= 2;
    let msg = format!("action executed: counter = {}", data.counter);
    info!("{}", msg);
    data.message_log.push(msg);
    data
  })?;

  // 5. Run it
  info!("Starting pipe execution...");
  let result = pipe.run(
    "counter",
    BasicContext {
      message_log: Vec::new(),
      counter: 5,
    },
  )?;

  // 6. Inspect the result
  info!("Final counter value: {}", result.counter);
  for log_entry in &result.message_log {
    info!("- {}", log_entry);
  }

  // Expected: (5+1)*2 - 1 = 11
  assert_eq!(result.counter, 11);
  assert_eq!(result.message_log.len(), 3);

  Ok(())
}
