use anyhow::Result;

use crate::commands::forward::{EnvOp, Forwarder};
use crate::commands::guard::require_venv;
use crate::config::AppContext;

pub fn run(ctx: &AppContext, package: &str) -> Result<i32> {
  let venv = require_venv(ctx)?;
  Forwarder::new(ctx, venv).status(&EnvOp::Remove {
    package: package.to_string(),
  })
}
