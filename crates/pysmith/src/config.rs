use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize as _;
use serde::Deserialize;
use toml::Value as TomlValue;

/// Name of the per-project config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".pysmith.toml";

/// Overrides `venv.dir` for a single invocation.
pub const VENV_DIR_ENV: &str = "PYSMITH_VENV_DIR";

/// Known top-level config keys.
const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["venv", "tools"];

/// Known keys within `[venv]` section.
const KNOWN_VENV_KEYS: &[&str] = &["dir", "python", "create"];

/// Known keys within `[tools]` section.
const KNOWN_TOOLS_KEYS: &[&str] = &["python", "pip"];

// Embed repository defaults
const DEFAULT_TOML: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/pysmith.toml"));

#[derive(Debug, Clone, Deserialize)]
pub struct VenvConfig {
  /// Environment directory relative to the working directory.
  #[serde(default = "default_venv_dir")]
  pub dir: String,
  /// Base interpreter argv used to populate a fresh environment.
  #[serde(default)]
  pub python: Vec<String>,
  /// Populate the environment on every `init`.
  #[serde(default)]
  pub create: bool,
}

impl Default for VenvConfig {
  fn default() -> Self {
    Self {
      dir: default_venv_dir(),
      python: Vec::new(),
      create: false,
    }
  }
}

fn default_venv_dir() -> String {
  "venv".to_string()
}

/// Argv templates for the tools living inside the environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolsConfig {
  #[serde(default)]
  pub python: Vec<String>,
  #[serde(default)]
  pub pip: Vec<String>,
}

impl ToolsConfig {
  /// Returns the interpreter argv, failing if undefined or empty.
  pub fn python_argv(&self) -> Result<&[String]> {
    non_empty_argv("tools.python", &self.python)
  }

  /// Returns the package installer argv, failing if undefined or empty.
  pub fn pip_argv(&self) -> Result<&[String]> {
    non_empty_argv("tools.pip", &self.pip)
  }
}

fn non_empty_argv<'a>(key: &str, argv: &'a [String]) -> Result<&'a [String]> {
  match argv.first() {
    Some(program) if !program.trim().is_empty() => Ok(argv),
    _ => bail!("{key} not defined or empty"),
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PysmithConfig {
  #[serde(default)]
  pub venv: VenvConfig,
  #[serde(default)]
  pub tools: ToolsConfig,
}

impl PysmithConfig {
  /// Returns the base interpreter argv used by `init --bootstrap`.
  pub fn base_python_argv(&self) -> Result<&[String]> {
    non_empty_argv("venv.python", &self.venv.python)
  }

  /// Resolve the environment directory name: `PYSMITH_VENV_DIR` -> `venv.dir` -> `venv`.
  #[must_use]
  pub fn venv_dir_name(&self) -> String {
    if let Ok(dir) = std::env::var(VENV_DIR_ENV)
      && !dir.trim().is_empty()
    {
      return dir;
    }
    if self.venv.dir.trim().is_empty() {
      return default_venv_dir();
    }
    self.venv.dir.clone()
  }
}

#[derive(Debug, Clone)]
pub struct ProjectPaths {
  cwd: PathBuf,
}

impl ProjectPaths {
  pub fn new(cwd: impl Into<PathBuf>) -> Self {
    Self { cwd: cwd.into() }
  }

  #[must_use]
  pub fn cwd(&self) -> &PathBuf {
    &self.cwd
  }

  /// Environment directory for the project rooted at the working directory.
  #[must_use]
  pub fn venv_dir(&self, cfg: &PysmithConfig) -> PathBuf {
    self.cwd.join(cfg.venv_dir_name())
  }

  /// Resolve a user-supplied path against the working directory.
  #[must_use]
  pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
    self.cwd.join(path)
  }
}

#[derive(Debug, Clone)]
pub struct AppContext {
  pub paths: ProjectPaths,
  pub config: PysmithConfig,
}

impl AppContext {
  /// Load configuration for `cwd` and bundle it with the project paths.
  pub fn load(cwd: impl Into<PathBuf>) -> Result<Self> {
    let paths = ProjectPaths::new(cwd);
    let config = load_config(paths.cwd())?;
    Ok(Self { paths, config })
  }
}

fn merge_values(base: &mut TomlValue, overlay: TomlValue) {
  match (base, overlay) {
    (TomlValue::Table(base_tbl), TomlValue::Table(overlay_tbl)) => {
      for (k, v) in overlay_tbl {
        match base_tbl.get_mut(&k) {
          Some(existing) => merge_values(existing, v),
          None => {
            base_tbl.insert(k, v);
          }
        }
      }
    }
    // Arrays and scalars: replace last-wins
    (base_slot, new_v) => *base_slot = new_v,
  }
}

/// Warn about unknown keys in a parsed TOML config file.
fn warn_unknown_keys(val: &TomlValue, file_path: &Path) {
  let TomlValue::Table(table) = val else {
    return;
  };

  for key in table.keys() {
    if !KNOWN_TOP_LEVEL_KEYS.contains(&key.as_str()) {
      eprintln!(
        "{}: unknown config key '{}' in {} (did you mean one of: {}?)",
        "warning".yellow(),
        key,
        file_path.display(),
        KNOWN_TOP_LEVEL_KEYS.join(", ")
      );
    }
  }

  for (section, known) in [("venv", KNOWN_VENV_KEYS), ("tools", KNOWN_TOOLS_KEYS)] {
    let Some(TomlValue::Table(inner)) = table.get(section) else {
      continue;
    };
    for key in inner.keys() {
      if !known.contains(&key.as_str()) {
        eprintln!(
          "{}: unknown config key '{}.{}' in {} (known keys: {})",
          "warning".yellow(),
          section,
          key,
          file_path.display(),
          known.join(", ")
        );
      }
    }
  }
}

fn merge_file(merged: &mut TomlValue, path: &Path) -> Result<()> {
  let data =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let val: TomlValue =
    toml::from_str(&data).with_context(|| format!("invalid TOML in {}", path.display()))?;
  warn_unknown_keys(&val, path);
  merge_values(merged, val);
  log::debug!("merged config from {}", path.display());
  Ok(())
}

/// Load and merge configuration from defaults, global, and project files.
///
/// # Errors
/// Returns an error if any of the config files cannot be read or parsed
/// as valid TOML, or if the merged config does not match the schema.
pub fn load_config(cwd: &Path) -> Result<PysmithConfig> {
  let mut merged: TomlValue =
    toml::from_str(DEFAULT_TOML).context("invalid embedded default config")?;

  let xdg = xdg::BaseDirectories::with_prefix("pysmith");
  if let Some(global_path) = xdg.find_config_file("pysmith.toml") {
    merge_file(&mut merged, &global_path)?;
  }

  let project_cfg = cwd.join(PROJECT_CONFIG_FILE);
  if project_cfg.is_file() {
    merge_file(&mut merged, &project_cfg)?;
  }

  let merged_str = toml::to_string(&merged).context("failed to serialize merged config")?;
  let cfg: PysmithConfig = toml::from_str(&merged_str).context("failed to parse merged config")?;
  Ok(cfg)
}
