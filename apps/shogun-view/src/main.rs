use std::process::ExitCode;

fn main() -> ExitCode {
  match cli::run() {
    Ok(code) => code,
    Err(err) => {
      eprintln!("shogun-view: {err:#}");
      ExitCode::FAILURE
    }
  }
}
