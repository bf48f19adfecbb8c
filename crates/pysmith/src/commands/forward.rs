use std::path::PathBuf;
use std::process::{Command as ProcCommand, Output, Stdio};

use anyhow::{Context, Result};

use crate::config::{AppContext, ToolsConfig};
use crate::errors::PysmithError;
use crate::utils::cmd::{CmdCtx, expand_argv};
use crate::utils::which::which;

/// Operations delegated to the tools inside the virtual environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvOp {
  Run { script: String, args: Vec<String> },
  List,
  Freeze,
  Outdated,
  Upgrade { packages: Vec<String> },
  Remove { package: String },
  InstallDeps { packages: Vec<String> },
}

impl EnvOp {
  /// Tool argv template for this operation (before placeholder expansion).
  pub fn tool<'a>(&self, tools: &'a ToolsConfig) -> Result<&'a [String]> {
    match self {
      Self::Run { .. } => tools.python_argv(),
      _ => tools.pip_argv(),
    }
  }

  /// Arguments appended verbatim after the tool argv.
  #[must_use]
  pub fn args(&self) -> Vec<String> {
    fn fixed(items: &[&str]) -> Vec<String> {
      items.iter().map(ToString::to_string).collect()
    }
    match self {
      Self::Run { script, args } => std::iter::once(script.clone())
        .chain(args.iter().cloned())
        .collect(),
      Self::List => fixed(&["list"]),
      Self::Freeze => fixed(&["freeze"]),
      Self::Outdated => fixed(&["list", "--outdated", "--format=json"]),
      Self::Upgrade { packages } => {
        let mut argv = fixed(&["install", "--upgrade"]);
        argv.extend(packages.iter().cloned());
        argv
      }
      Self::Remove { package } => {
        let mut argv = fixed(&["uninstall", "-y"]);
        argv.push(package.clone());
        argv
      }
      Self::InstallDeps { packages } => {
        let mut argv = fixed(&["install"]);
        argv.extend(packages.iter().cloned());
        argv
      }
    }
  }
}

/// Spawns environment tools for a project whose venv passed the guard.
pub struct Forwarder<'a> {
  ctx: &'a AppContext,
  cmd_ctx: CmdCtx,
}

impl<'a> Forwarder<'a> {
  pub fn new(ctx: &'a AppContext, venv: PathBuf) -> Self {
    let cmd_ctx = CmdCtx::from_process_env(venv, ctx.paths.cwd().clone());
    Self { ctx, cmd_ctx }
  }

  /// Full argv for `op`: expanded tool template followed by the operation arguments.
  pub fn argv(&self, op: &EnvOp) -> Result<Vec<String>> {
    let mut argv = expand_argv(op.tool(&self.ctx.config.tools)?, &self.cmd_ctx);
    argv.extend(op.args());
    Ok(argv)
  }

  fn command(&self, op: &EnvOp) -> Result<(ProcCommand, String)> {
    let argv = self.argv(op)?;
    let (program, args) = argv
      .split_first()
      .ok_or_else(|| anyhow::anyhow!("command is empty"))?;
    let resolved = which(program).ok_or_else(|| PysmithError::ToolNotFound(program.clone()))?;
    log::debug!("forwarding: {}", argv.join(" "));
    let mut cmd = ProcCommand::new(resolved);
    cmd.args(args).current_dir(self.ctx.paths.cwd());
    Ok((cmd, program.clone()))
  }

  /// Run `op` with inherited stdio and return its exit code unchanged.
  pub fn status(&self, op: &EnvOp) -> Result<i32> {
    let (mut cmd, program) = self.command(op)?;
    let status = cmd
      .status()
      .with_context(|| format!("failed to execute: {program}"))?;
    Ok(status.code().unwrap_or(1))
  }

  /// Run `op` capturing stdout; stderr stays attached to the terminal.
  pub fn output(&self, op: &EnvOp) -> Result<Output> {
    let (mut cmd, program) = self.command(op)?;
    cmd.stdout(Stdio::piped()).stderr(Stdio::inherit());
    cmd
      .output()
      .with_context(|| format!("failed to execute: {program}"))
  }
}
