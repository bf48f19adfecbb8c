use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod errors;
mod texts;
mod utils;

use crate::config::AppContext;

/// PySmith - scaffold Python projects and manage their virtual environments.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
  /// Create a project directory with standard files and a virtual environment
  Init {
    project_name: String,
    /// Populate the virtual environment with the base interpreter
    #[arg(long)]
    bootstrap: bool,
  },
  /// Run a Python script inside the virtual environment
  Run {
    script_path: String,
    /// Arguments passed to the script (after `--`)
    #[arg(last = true)]
    args: Vec<String>,
  },
  /// List installed packages
  List,
  /// Print installed packages in requirements format
  Freeze {
    /// Write the requirements to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Upgrade all outdated packages
  Upgrade,
  /// Uninstall a package
  Remove { package_name: String },
  /// Install one or more packages
  InstallDeps {
    #[arg(required = true, num_args = 1..)]
    packages: Vec<String>,
  },
}

pub fn parse() -> Cli {
  Cli::parse()
}

/// Parse the process arguments and execute the selected command.
///
/// Returns the exit code to terminate with; forwarded commands report the
/// environment tool's code unchanged.
pub fn run() -> Result<i32> {
  utils::log::init_diagnostics();
  let cli = parse();
  let cwd = std::env::current_dir()?;
  dispatch(cli, cwd)
}

/// Print a failure as one red line on stderr, causes included.
pub fn report_error(err: &anyhow::Error) {
  crate::log_error!("{}", error_line(err));
}

fn error_line(err: &anyhow::Error) -> String {
  format!("{err:#}")
}

fn dispatch(cli: Cli, cwd: PathBuf) -> Result<i32> {
  let Some(command) = cli.command else {
    for line in texts::banner::banner_lines() {
      crate::log_info!("{}", line);
    }
    return Ok(0);
  };

  let ctx = AppContext::load(cwd)?;
  match command {
    Commands::Init {
      project_name,
      bootstrap,
    } => {
      commands::init::run(&ctx, &project_name, bootstrap)?;
      Ok(0)
    }
    Commands::Run { script_path, args } => commands::run::run(&ctx, &script_path, &args),
    Commands::List => commands::list::run(&ctx),
    Commands::Freeze { output } => commands::freeze::run(&ctx, output.as_deref()),
    Commands::Upgrade => commands::upgrade::run(&ctx),
    Commands::Remove { package_name } => commands::remove::run(&ctx, &package_name),
    Commands::InstallDeps { packages } => commands::install_deps::run(&ctx, &packages),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::VENV_DIR_ENV;
  use crate::errors::PysmithError;

  fn parse_args(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("pysmith").chain(args.iter().copied()))
      .expect("valid arguments")
  }

  fn isolated<R>(f: impl FnOnce() -> R) -> R {
    let xdg = tempfile::tempdir().expect("xdg tempdir");
    temp_env::with_vars(
      [
        ("XDG_CONFIG_HOME", Some(xdg.path().display().to_string())),
        (VENV_DIR_ENV, None),
      ],
      f,
    )
  }

  #[test]
  fn no_subcommand_prints_banner() {
    let dir = tempfile::tempdir().expect("tempdir");
    let code = dispatch(parse_args(&[]), dir.path().to_path_buf()).expect("banner");
    assert_eq!(code, 0);
  }

  #[test]
  fn error_line_keeps_the_cause() {
    let err = anyhow::Error::new(std::io::Error::other("disk full"))
      .context("failed to write requirements.txt");
    let line = error_line(&err);
    assert_eq!(line, "failed to write requirements.txt: disk full");
    report_error(&err);
  }

  #[test]
  fn install_deps_requires_a_package() {
    let res = Cli::try_parse_from(["pysmith", "install-deps"]);
    assert!(res.is_err());
  }

  #[test]
  fn run_collects_trailing_args() {
    let cli = parse_args(&["run", "main.py", "--", "-v", "x"]);
    match cli.command {
      Some(Commands::Run { script_path, args }) => {
        assert_eq!(script_path, "main.py");
        assert_eq!(args, vec!["-v", "x"]);
      }
      other => panic!("unexpected command: {other:?}"),
    }
  }

  #[test]
  fn every_env_command_stops_at_the_guard() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("script.py"), "print('hi')\n").expect("write");
    let invocations: [&[&str]; 6] = [
      &["run", "script.py"],
      &["list"],
      &["freeze"],
      &["upgrade"],
      &["remove", "requests"],
      &["install-deps", "pytest", "black"],
    ];
    for args in invocations {
      let err = isolated(|| dispatch(parse_args(args), dir.path().to_path_buf()))
        .expect_err("guard should fail");
      assert!(
        matches!(
          err.downcast_ref::<PysmithError>(),
          Some(PysmithError::NoEnvironment(_))
        ),
        "{args:?}: {err}"
      );
    }
  }

  #[test]
  fn init_then_reinit_collides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = isolated(|| dispatch(parse_args(&["init", "demo"]), dir.path().to_path_buf()));
    assert_eq!(first.expect("first init"), 0);
    let second = isolated(|| dispatch(parse_args(&["init", "demo"]), dir.path().to_path_buf()))
      .expect_err("second init");
    assert!(second.to_string().ends_with("already exists"), "{second}");
  }
}
