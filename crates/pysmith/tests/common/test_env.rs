use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use temp_env::with_vars;
use tempfile::{Builder, TempDir};

/// Fake interpreter installed as `venv/bin/python`.
///
/// `-m pip ...` prints canned pip output and exits with `$FAKE_PIP_EXIT`;
/// anything else is executed as a shell script so `run` can be exercised.
/// Every invocation is appended to `venv/calls.log`.
const FAKE_PYTHON: &str = r#"#!/bin/sh
venv="$(cd "$(dirname "$0")/.." && pwd)"
printf '%s\n' "$*" >> "$venv/calls.log"
if [ "$1" = "-m" ] && [ "$2" = "pip" ]; then
  shift 2
  case "$1" in
    list)
      if [ "$2" = "--outdated" ]; then
        if [ -f "$venv/outdated.json" ]; then cat "$venv/outdated.json"; else echo "[]"; fi
      else
        echo "Package  Version"
        echo "requests 2.31.0"
      fi
      ;;
    freeze) echo "requests==2.31.0" ;;
    uninstall) echo "Successfully uninstalled $3" ;;
    install) shift; echo "Successfully installed $*" ;;
  esac
  exit "${FAKE_PIP_EXIT:-0}"
fi
exec /bin/sh "$@"
"#;

#[derive(Debug)]
pub struct TestEnv {
  temp: TempDir,
  xdg_home: TempDir,
}

impl TestEnv {
  pub fn run<F, R>(f: F) -> R
  where
    F: FnOnce(&TestEnv) -> R,
  {
    let env = TestEnv::new();
    with_vars(
      [
        (
          "XDG_CONFIG_HOME",
          Some(env.xdg_home_dir().display().to_string()),
        ),
        ("PYSMITH_VENV_DIR", None),
      ],
      || f(&env),
    )
  }

  pub fn new() -> Self {
    let temp = Builder::new()
      .prefix("pysmith-test-")
      .tempdir_in(tmp_root())
      .expect("temp dir");
    let xdg_home = Builder::new()
      .prefix("xdg-")
      .tempdir_in(tmp_root())
      .expect("xdg dir");
    Self { temp, xdg_home }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  pub fn xdg_home_dir(&self) -> &Path {
    self.xdg_home.path()
  }

  pub fn venv_dir(&self) -> PathBuf {
    self.path().join("venv")
  }

  pub fn pysmith(&self) -> Result<Command> {
    let mut cmd = Command::cargo_bin("pysmith")?;
    cmd.current_dir(self.path());
    cmd.env("XDG_CONFIG_HOME", self.xdg_home_dir());
    cmd.env_remove("PYSMITH_VENV_DIR");
    cmd.env_remove("FAKE_PIP_EXIT");
    Ok(cmd)
  }

  /// Sorted entry names of a directory below the workdir.
  pub fn entries(&self, relative: &str) -> Result<Vec<String>> {
    let mut names = std::fs::read_dir(self.path().join(relative))?
      .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
      .collect::<std::io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
  }

  /// Create `venv/` with a fake interpreter that records its invocations.
  pub fn fake_venv(&self) -> Result<PathBuf> {
    let venv = self.venv_dir();
    self.write_executable_script(&venv.join("bin").join("python"), FAKE_PYTHON)?;
    Ok(venv)
  }

  /// Lines recorded by the fake interpreter, one per invocation.
  pub fn venv_calls(&self) -> Result<Vec<String>> {
    let log = self.venv_dir().join("calls.log");
    if !log.exists() {
      return Ok(Vec::new());
    }
    Ok(
      std::fs::read_to_string(log)?
        .lines()
        .map(str::to_string)
        .collect(),
    )
  }

  pub fn write_executable_script(&self, path: &Path, body: &str) -> Result<()> {
    self.write_file_at(path, body)?;
    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt as _;
      let metadata = std::fs::metadata(path).map_err(|err| {
        anyhow::anyhow!("read script metadata at {}: {err}", path.display())
      })?;
      let mut perms = metadata.permissions();
      perms.set_mode(0o755);
      std::fs::set_permissions(path, perms).map_err(|err| {
        anyhow::anyhow!("set script executable at {}: {err}", path.display())
      })?;
    }
    Ok(())
  }

  pub fn write_file(&self, relative: &str, body: &str) -> Result<PathBuf> {
    let path = self.path().join(relative);
    self.write_file_at(&path, body)?;
    Ok(path)
  }

  fn write_file_at(&self, path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).map_err(|err| {
        anyhow::anyhow!(
          "create parent dir for file under {}: {err}",
          self.path().display()
        )
      })?;
    }
    std::fs::write(path, body).map_err(|err| {
      anyhow::anyhow!(
        "write file body at {} relative to {}: {err}",
        path.display(),
        self.path().display()
      )
    })?;
    Ok(())
  }

  pub fn write_xdg_config(&self, relative: &str, body: &str) -> Result<PathBuf> {
    let path = self.xdg_home_dir().join(relative);
    self.write_file_at(&path, body)?;
    Ok(path)
  }
}

/// Returns a workspace-local temp root for tests under `./target/test-tmp` at the workspace root.
pub fn tmp_root() -> PathBuf {
  let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  // Walk two parents up: crates/pysmith -> crates -> workspace root
  let workspace_root = manifest_dir
    .parent()
    .and_then(|p| p.parent())
    .unwrap_or(&manifest_dir)
    .to_path_buf();
  let root = workspace_root.join("target").join("test-tmp");
  let _ = std::fs::create_dir_all(&root);
  root
}
