// tests/pipe_execution_tests.rs
mod common; // Reference the common module

use common::*;
use pipes::{Action, Pipe, PipeError};
use serial_test::serial;

#[test]
fn test_single_stage_runs_handlers_in_registration_order() {
  setup_tracing();
  let mut pipe = Pipe::<String, PipeError>::new(["stage1"]).unwrap();

  pipe.on("default", "stage1", append(" had")).unwrap();
  pipe.on("default", "stage1", append(" a little")).unwrap();
  pipe.on("default", "stage1", append(" lamb")).unwrap();

  let result = pipe.run("default", "Mary".to_string()).unwrap();
  assert_eq!(result, "Mary had a little lamb");
}

#[test]
fn test_stage_order_wins_over_registration_order() {
  setup_tracing();
  let mut pipe = Pipe::<String, PipeError>::new(["stage1", "stage2", "stage3"]).unwrap();

  pipe.on("default", "stage3", append(" lamb")).unwrap();
  pipe.on("default", "stage1", append(" had")).unwrap();
  pipe.on("default", "stage2", append(" a little")).unwrap();

  let result = pipe.run("default", "Mary".to_string()).unwrap();
  assert_eq!(result, "Mary had a little lamb");
}

#[test]
fn test_empty_stage_is_skipped() {
  setup_tracing();
  let mut pipe = Pipe::<String, PipeError>::new(["stage1", "stage2", "stage3"]).unwrap();

  pipe.on("default", "stage3", append(" lamb")).unwrap();
  pipe.on("default", "stage1", append(" had a little")).unwrap();

  let result = pipe.run("default", "Mary".to_string()).unwrap();
  assert_eq!(result, "Mary had a little lamb");
}

#[test]
fn test_multiple_actions_across_multiple_stages() {
  setup_tracing();
  let mut pipe = Pipe::<String, PipeError>::new(["stage1", "stage2", "stage3"]).unwrap();

  pipe.on("default", "stage3", append(" little")).unwrap();
  pipe.on("default", "stage3", append(" lamb")).unwrap();
  pipe.on("default", "stage1", append(" had")).unwrap();
  pipe.on("default", "stage1", append(" a")).unwrap();

  let result = pipe.run("default", "Mary".to_string()).unwrap();
  assert_eq!(result, "Mary had a little lamb");
}

#[test]
fn test_sequence_registration_keeps_element_order() {
  setup_tracing();
  let mut pipe = Pipe::<String, PipeError>::new(["only"]).unwrap();

  pipe
    .on("default", "only", vec![append(" had"), append(" a little"), append(" lamb")])
    .unwrap();

  assert_eq!(pipe.handler_count("default", "only"), 3);
  assert_eq!(pipe.run("default", "Mary".to_string()).unwrap(), "Mary had a little lamb");
}

#[test]
fn test_pipe_names_share_stages_but_not_handlers() {
  setup_tracing();
  let mut pipe = Pipe::<i64, PipeError>::new(["parse", "transform", "emit"]).unwrap();

  pipe.on_map("double", "transform", |v| v * 2).unwrap();
  pipe.on_map("square", "transform", |v| v * v).unwrap();
  pipe.on_map("square", "emit", |v| v + 1).unwrap();

  assert_eq!(pipe.run("double", 7).unwrap(), 14);
  assert_eq!(pipe.run("square", 7).unwrap(), 50);
}

#[test]
fn test_value_is_replaced_not_mutated_in_place() {
  setup_tracing();
  let mut pipe = Pipe::<Vec<u8>, PipeError>::new(["a", "b"]).unwrap();

  pipe.on_map("p", "a", |_| vec![9, 9, 9]).unwrap();
  pipe
    .on_map("p", "b", |mut v| {
      v.push(1);
      v
    })
    .unwrap();

  assert_eq!(pipe.run("p", vec![0]).unwrap(), vec![9, 9, 9, 1]);
}

#[test]
fn test_run_can_be_repeated_with_fresh_values() {
  setup_tracing();
  let mut pipe = Pipe::<i32, PipeError>::new(["s"]).unwrap();
  pipe.on_map("inc", "s", |v| v + 1).unwrap();

  assert_eq!(pipe.run("inc", 1).unwrap(), 2);
  assert_eq!(pipe.run("inc", 41).unwrap(), 42);
}

#[test]
#[serial]
fn test_struct_context_flows_through_every_stage() {
  setup_tracing();
  reset_counters();
  let mut pipe = Pipe::<TestContext, TestError>::new(["step1", "step2", "step3"]).unwrap();

  pipe.on("main", "step1", create_simple_handler("step1", " S1")).unwrap();
  pipe.on("main", "step2", create_simple_handler("step2", " S2")).unwrap();
  pipe.on("main", "step3", create_simple_handler("step3", " S3")).unwrap();

  let result = pipe.run("main", TestContext::default()).unwrap();

  assert_eq!(result.counter, 3);
  assert_eq!(result.message, " S1 S2 S3");
  assert_eq!(result.steps_executed, vec!["step1", "step2", "step3"]);
  assert_eq!(handler_exec_count(), 3);
}

#[test]
fn test_flat_pipe_runs_default_stage() {
  setup_tracing();
  let mut pipe = Pipe::<String, PipeError>::flat();

  pipe.on_flat("greet", [append(","), append(" world")]).unwrap();
  pipe.on_flat("greet", Action::map(|v: String| v + "!")).unwrap();

  assert_eq!(pipe.stages(), &[pipes::DEFAULT_STAGE]);
  assert_eq!(pipe.run("greet", "hello".to_string()).unwrap(), "hello, world!");
}

#[test]
fn test_identity_handlers_leave_value_untouched() {
  setup_tracing();
  let mut pipe: Pipe<String, PipeError> = pipes::pipe!["stage1", "stage2", "stage3"].unwrap();

  for stage in ["stage1", "stage2", "stage3"] {
    pipe.on_map("default", stage, |options: String| options).unwrap();
  }

  assert_eq!(pipe.run("default", "unchanged".to_string()).unwrap(), "unchanged");
}
