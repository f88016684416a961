// pipes/src/core/stage.rs

//! The stage registry: the ordered, immutable list of stage names shared by
//! every pipe name registered on one `Pipe` instance.

use crate::error::{PipeError, PipeResult};
use std::collections::HashSet;
use tracing::{event, Level};

/// Name of the implicit single stage used by flat (stage-less) pipes.
pub const DEFAULT_STAGE: &str = "default";

/// Ordered list of stage names, validated once at construction.
///
/// Order here is the execution order. Membership in this list is the only
/// thing that makes a stage name valid for registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageList {
  names: Vec<String>,
}

impl StageList {
  /// Validates and stores `stage_names` in the given order.
  ///
  /// Fails with `InvalidArguments` if the list is empty, then with
  /// `DuplicateStageNames` if any name repeats. Any string is a valid stage
  /// name, the empty string included.
  pub fn new<I, S>(stage_names: I) -> PipeResult<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let names: Vec<String> = stage_names.into_iter().map(Into::into).collect();

    if names.is_empty() {
      event!(Level::ERROR, "Stage list is empty.");
      return Err(PipeError::InvalidArguments {
        message: "stage names argument does not exist or is empty".to_string(),
      });
    }

    let mut seen = HashSet::with_capacity(names.len());
    for name in &names {
      if !seen.insert(name.as_str()) {
        event!(Level::ERROR, stage_name = %name, "Stage list contains a duplicate name.");
        return Err(PipeError::DuplicateStageNames {
          stage_name: name.clone(),
        });
      }
    }

    Ok(Self { names })
  }

  /// The single-stage list used by flat pipes.
  pub fn single_default() -> Self {
    Self {
      names: vec![DEFAULT_STAGE.to_string()],
    }
  }

  pub fn contains(&self, stage_name: &str) -> bool {
    self.names.iter().any(|name| name == stage_name)
  }

  pub fn position(&self, stage_name: &str) -> Option<usize> {
    self.names.iter().position(|name| name == stage_name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.names.iter().map(String::as_str)
  }

  pub fn as_slice(&self) -> &[String] {
    &self.names
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  // Always false for a constructed list.
  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}
