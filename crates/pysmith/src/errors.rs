//! Terminal failures surfaced to the user as a single line.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PysmithError {
  #[error("{} already exists", .0.display())]
  AlreadyExists(PathBuf),

  #[error("No virtual environment found at {}. Run `pysmith init <name>` to create a project", .0.display())]
  NoEnvironment(PathBuf),

  #[error("invalid project name: '{0}'")]
  InvalidProjectName(String),

  #[error("invalid virtual environment directory: '{0}' (must be a single directory name)")]
  InvalidVenvDir(String),

  #[error("environment tool not found: {0}. Is the virtual environment populated?")]
  ToolNotFound(String),

  #[error("script not found: {}", .0.display())]
  ScriptNotFound(PathBuf),
}
