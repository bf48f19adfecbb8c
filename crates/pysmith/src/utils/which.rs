use std::path::{Path, PathBuf};

/// Resolve `program` to an executable path. Programs containing a path
/// separator are checked directly, bare names are looked up on PATH.
#[must_use]
pub(crate) fn which(program: &str) -> Option<PathBuf> {
  let has_sep = program.contains('/') || program.contains(std::path::MAIN_SEPARATOR);
  if has_sep {
    return executable_candidate(PathBuf::from(program));
  }

  let paths = std::env::var_os("PATH")?;
  std::env::split_paths(&paths).find_map(|dir| executable_candidate(dir.join(program)))
}

fn executable_candidate(candidate: PathBuf) -> Option<PathBuf> {
  if is_executable(&candidate) {
    return Some(candidate);
  }
  if cfg!(windows) && candidate.extension().is_none() {
    let exe = candidate.with_extension("exe");
    if is_executable(&exe) {
      return Some(exe);
    }
  }
  None
}

/// Returns true when `path` is a regular file carrying an execute bit.
#[must_use]
pub(crate) fn is_executable(path: &Path) -> bool {
  let Ok(meta) = std::fs::metadata(path) else {
    return false;
  };
  if !meta.is_file() {
    return false;
  }
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt as _;
    meta.permissions().mode() & 0o111 != 0
  }
  #[cfg(not(unix))]
  {
    true
  }
}
