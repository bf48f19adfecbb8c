use anyhow::{Context, Result};
use serde::Deserialize;

use crate::commands::forward::{EnvOp, Forwarder};
use crate::commands::guard::require_venv;
use crate::config::AppContext;
use crate::utils::log::t;
use crate::{log_info, log_success};

/// One entry of `pip list --outdated --format=json`.
#[derive(Debug, Deserialize)]
struct OutdatedPackage {
  name: String,
  #[serde(default)]
  version: String,
  #[serde(default)]
  latest_version: String,
}

fn parse_outdated(stdout: &[u8]) -> Result<Vec<OutdatedPackage>> {
  let text = String::from_utf8_lossy(stdout);
  if text.trim().is_empty() {
    return Ok(Vec::new());
  }
  serde_json::from_str(text.trim()).context("failed to parse outdated package list")
}

/// Upgrade every outdated package in the environment.
pub fn run(ctx: &AppContext) -> Result<i32> {
  let venv = require_venv(ctx)?;
  let forwarder = Forwarder::new(ctx, venv);

  let out = forwarder.output(&EnvOp::Outdated)?;
  if !out.status.success() {
    return Ok(out.status.code().unwrap_or(1));
  }
  let outdated = parse_outdated(&out.stdout)?;
  if outdated.is_empty() {
    log_success!("All packages are up to date");
    return Ok(0);
  }

  for pkg in &outdated {
    log_info!(
      "  {} {} -> {}",
      t::name(&pkg.name),
      pkg.version,
      pkg.latest_version
    );
  }
  let packages = outdated.into_iter().map(|pkg| pkg.name).collect();
  forwarder.status(&EnvOp::Upgrade { packages })
}
