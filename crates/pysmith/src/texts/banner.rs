use owo_colors::OwoColorize as _;

fn highlight_name() -> String {
  "PySmith".bright_cyan().bold().to_string()
}

fn highlight_cmd(cmd: &str) -> String {
  format!("{}", cmd.bright_cyan().bold())
}

pub fn banner_lines() -> Vec<String> {
  vec![
    format!(
      "{} - scaffold Python projects and manage their virtual environments.",
      highlight_name()
    ),
    String::new(),
    format!("Create a project with {}.", highlight_cmd("pysmith init <name>")),
    format!("Run {} to see all commands.", highlight_cmd("pysmith --help")),
  ]
}
