use std::collections::HashMap;
use std::path::{Path, PathBuf};

use regex::Regex;

/// Context for tool argv expansion.
/// - `venv`: absolute environment directory used for `<venv>`.
/// - `cwd`: working directory used for `<cwd>`.
/// - `env`: variables used for `$VAR` expansion.
#[derive(Debug, Clone)]
pub struct CmdCtx {
  pub venv: PathBuf,
  pub cwd: PathBuf,
  pub env: HashMap<String, String>,
}

impl CmdCtx {
  pub fn with_env(venv: impl Into<PathBuf>, cwd: impl Into<PathBuf>, env: HashMap<String, String>) -> Self {
    Self {
      venv: venv.into(),
      cwd: cwd.into(),
      env,
    }
  }

  pub fn from_process_env(venv: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
    let env: HashMap<String, String> = std::env::vars().collect();
    Self::with_env(venv, cwd, env)
  }
}

/// Directory holding the environment's executables.
#[must_use]
pub fn venv_bin_dir(venv: &Path) -> PathBuf {
  if cfg!(windows) {
    venv.join("Scripts")
  } else {
    venv.join("bin")
  }
}

/// Expand argv tokens using context:
/// - Replace `<venv-bin>`, `<venv>` and `<cwd>` with their paths.
/// - Expand `$VARS` using `ctx.env` (unknown -> empty string).
pub fn expand_argv(argv: &[String], ctx: &CmdCtx) -> Vec<String> {
  let var_re = Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("valid var regex");
  let venv_bin = venv_bin_dir(&ctx.venv).display().to_string();
  let venv = ctx.venv.display().to_string();
  let cwd = ctx.cwd.display().to_string();
  argv
    .iter()
    .map(|raw| {
      let with_paths = raw
        .replace("<venv-bin>", &venv_bin)
        .replace("<venv>", &venv)
        .replace("<cwd>", &cwd);
      var_re
        .replace_all(&with_paths, |caps: &regex::Captures| {
          ctx.env.get(&caps[1]).map_or("", String::as_str)
        })
        .to_string()
    })
    .collect()
}
