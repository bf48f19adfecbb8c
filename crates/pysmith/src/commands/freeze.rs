use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::forward::{EnvOp, Forwarder};
use crate::commands::guard::require_venv;
use crate::config::AppContext;
use crate::utils::log::t;
use crate::{log_success, log_warn};

/// Dump installed packages in requirements format, to stdout or to `output`.
pub fn run(ctx: &AppContext, output: Option<&Path>) -> Result<i32> {
  let venv = require_venv(ctx)?;
  let forwarder = Forwarder::new(ctx, venv);
  let Some(output) = output else {
    return forwarder.status(&EnvOp::Freeze);
  };

  let out = forwarder.output(&EnvOp::Freeze)?;
  if !out.status.success() {
    return Ok(out.status.code().unwrap_or(1));
  }
  let target = ctx.paths.resolve(output);
  if target.exists() {
    log_warn!("Overwriting {}", output.display());
  }
  fs::write(&target, &out.stdout)
    .with_context(|| format!("failed to write {}", target.display()))?;
  log_success!("Wrote requirements to {}", t::path(output.display()));
  Ok(0)
}
