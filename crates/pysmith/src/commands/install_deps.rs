use anyhow::{Result, bail};

use crate::commands::forward::{EnvOp, Forwarder};
use crate::commands::guard::require_venv;
use crate::config::AppContext;

pub fn run(ctx: &AppContext, packages: &[String]) -> Result<i32> {
  let venv = require_venv(ctx)?;
  if packages.is_empty() {
    bail!("no packages given");
  }
  Forwarder::new(ctx, venv).status(&EnvOp::InstallDeps {
    packages: packages.to_vec(),
  })
}
