// pipes/examples/composed_pipes.rs

//! Builds a request-handling pipe out of smaller pipes registered on the same
//! instance, using pipe names as actions.

use pipes::{Action, Pipe, PipeError};
use tracing::info;

#[derive(Clone, Debug, Default)]
struct Request {
  path: String,
  user: Option<String>,
  headers: Vec<(String, String)>,
  audit: Vec<String>,
}

fn main() -> Result<(), PipeError> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
    .init();

  info!("--- Composed Pipes Example ---");

  let mut pipe = Pipe::<Request, PipeError>::new(["before", "action", "after"])?;

  // Small, reusable pipes.
  pipe.on_map("normalize", "action", |mut req: Request| {
    req.path = req.path.trim_end_matches('/').to_lowercase();
    req.audit.push("normalize".to_string());
    req
  })?;

  pipe.on_handler("authenticate", "action", |mut req: Request| {
    let user = req
      .headers
      .iter()
      .find(|(name, _)| name == "x-user")
      .map(|(_, value)| value.clone())
      .ok_or_else(|| anyhow::anyhow!("missing x-user header"))?;
    req.user = Some(user);
    req.audit.push("authenticate".to_string());
    Ok::<_, PipeError>(req)
  })?;

  pipe.on_map("log", "after", |mut req: Request| {
    info!(path = %req.path, user = ?req.user, "request handled");
    req.audit.push("log".to_string());
    req
  })?;

  // The aggregate pipe: a mix of pipe names and a local handler.
  pipe.on("request", "before", ["normalize", "authenticate"].map(Action::from))?;
  pipe.on_map("request", "action", |mut req: Request| {
    req.audit.push(format!("serve {}", req.path));
    req
  })?;
  pipe.on_delegate("request", "after", "log")?;

  let request = Request {
    path: "/Users/42/".to_string(),
    headers: vec![("x-user".to_string(), "mary".to_string())],
    ..Default::default()
  };
  let handled = pipe.run("request", request)?;
  info!("Audit trail: {:?}", handled.audit);
  assert_eq!(
    handled.audit,
    vec!["normalize", "authenticate", "serve /users/42", "log"]
  );

  // Without the header, "authenticate" fails and nothing after it runs.
  let rejected = pipe.run("request", Request {
    path: "/users/7".to_string(),
    ..Default::default()
  });
  match rejected {
    Err(e) => info!("Rejected: {}", e),
    Ok(req) => panic!("expected rejection, got {:?}", req),
  }

  Ok(())
}
