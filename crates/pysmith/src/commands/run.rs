use anyhow::Result;

use crate::commands::forward::{EnvOp, Forwarder};
use crate::commands::guard::require_venv;
use crate::config::AppContext;
use crate::errors::PysmithError;

/// Execute `script` with the environment's interpreter; returns its exit code.
pub fn run(ctx: &AppContext, script: &str, args: &[String]) -> Result<i32> {
  let venv = require_venv(ctx)?;
  let script_path = ctx.paths.resolve(script);
  if !script_path.is_file() {
    return Err(PysmithError::ScriptNotFound(script_path).into());
  }
  Forwarder::new(ctx, venv).status(&EnvOp::Run {
    script: script.to_string(),
    args: args.to_vec(),
  })
}
