use std::fs;
use std::path::{Component, Path};
use std::process::Command as ProcCommand;

use anyhow::{Context, Result, bail};

use crate::config::AppContext;
use crate::errors::PysmithError;
use crate::utils::cmd::{CmdCtx, expand_argv};
use crate::utils::log::t;
use crate::utils::which::which;
use crate::{log_info, log_success};

fn readme(name: &str) -> String {
  format!(
    "# {name}\n\nProject scaffolded with pysmith.\n\n## Usage\n\n    pysmith install-deps <package>\n    pysmith run <script.py>\n    pysmith freeze -o requirements.txt\n"
  )
}

fn gitignore(venv_dir: &str) -> String {
  format!(
    "# Virtual environment\n{venv_dir}/\n\n# Byte-compiled files\n__pycache__/\n*.py[cod]\n\n# Packaging\nbuild/\ndist/\n*.egg-info/\n\n# Tooling caches\n.pytest_cache/\n.mypy_cache/\n.coverage\n"
  )
}

/// True when `name` names exactly one entry directly below its parent.
fn is_single_component(name: &str) -> bool {
  let mut components = Path::new(name).components();
  matches!(
    (components.next(), components.next()),
    (Some(Component::Normal(_)), None)
  ) && !name.trim().is_empty()
}

fn validate_name(name: &str) -> Result<(), PysmithError> {
  if is_single_component(name) {
    Ok(())
  } else {
    Err(PysmithError::InvalidProjectName(name.to_string()))
  }
}

fn validate_venv_dir(dir: &str) -> Result<(), PysmithError> {
  if is_single_component(dir) {
    Ok(())
  } else {
    Err(PysmithError::InvalidVenvDir(dir.to_string()))
  }
}

/// Scaffold `<cwd>/<name>`. Never touches an existing entry at that path.
pub fn run(ctx: &AppContext, name: &str, bootstrap: bool) -> Result<()> {
  validate_name(name)?;
  let venv_dir = ctx.config.venv_dir_name();
  validate_venv_dir(&venv_dir)?;
  let root = ctx.paths.resolve(name);
  if fs::symlink_metadata(&root).is_ok() {
    return Err(PysmithError::AlreadyExists(root).into());
  }

  fs::create_dir(&root).with_context(|| format!("failed to create {}", root.display()))?;

  write_file(&root.join("__init__.py"), "")?;
  write_file(&root.join("README.md"), &readme(name))?;
  write_file(&root.join(".gitignore"), &gitignore(&venv_dir))?;

  let venv = root.join(&venv_dir);
  fs::create_dir_all(&venv).with_context(|| format!("failed to create {}", venv.display()))?;

  if bootstrap || ctx.config.venv.create {
    create_venv(ctx, &root, &venv)?;
  }

  log_success!("{name} initialized successfully");
  log_info!("  {}", t::path(root.display()));
  Ok(())
}

fn write_file(path: &Path, body: &str) -> Result<()> {
  fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

/// Populate `venv` by running `<python> -m venv <venv>` with the base interpreter.
fn create_venv(ctx: &AppContext, root: &Path, venv: &Path) -> Result<()> {
  let cmd_ctx = CmdCtx::from_process_env(venv, root);
  let mut argv = expand_argv(ctx.config.base_python_argv()?, &cmd_ctx);
  argv.extend(["-m".to_string(), "venv".to_string(), venv.display().to_string()]);
  let (program, args) = argv
    .split_first()
    .ok_or_else(|| anyhow::anyhow!("command is empty"))?;
  let resolved = which(program).ok_or_else(|| PysmithError::ToolNotFound(program.clone()))?;

  log_info!("Creating virtual environment: {}", t::cmd(&argv));
  log::debug!("bootstrap argv: {argv:?}");
  let status = ProcCommand::new(resolved)
    .args(args)
    .current_dir(root)
    .status()
    .with_context(|| format!("failed to execute: {program}"))?;
  if !status.success() {
    bail!("failed to create virtual environment: {program} exited with {status}");
  }
  Ok(())
}
