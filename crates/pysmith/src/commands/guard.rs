use std::path::PathBuf;

use crate::config::AppContext;
use crate::errors::PysmithError;

/// Locate the project's virtual environment, failing when it is missing.
///
/// Every command that forwards to the environment calls this first and must
/// not touch anything else when it fails.
pub fn require_venv(ctx: &AppContext) -> Result<PathBuf, PysmithError> {
  let venv = ctx.paths.venv_dir(&ctx.config);
  if venv.is_dir() {
    log::debug!("using virtual environment at {}", venv.display());
    Ok(venv)
  } else {
    Err(PysmithError::NoEnvironment(venv))
  }
}
