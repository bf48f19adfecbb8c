fn main() {
  match pysmith::run() {
    Ok(code) => std::process::exit(code),
    Err(err) => {
      pysmith::report_error(&err);
      std::process::exit(1);
    }
  }
}
