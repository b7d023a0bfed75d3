use std::process::ExitCode;

use clap::Parser;

use moodmix_lib::cli::Cli;
use moodmix_lib::telemetry;

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  telemetry::init();

  // Ctrl-C suelta el futuro en curso: las peticiones pendientes se abortan
  // y no se imprime ninguna playlist parcial.
  tokio::select! {
    result = moodmix_lib::run(cli) => match result {
      Ok(()) => ExitCode::SUCCESS,
      Err(e) => {
        eprintln!("error: {e:#}");
        ExitCode::FAILURE
      }
    },
    _ = tokio::signal::ctrl_c() => {
      eprintln!("interrupted");
      ExitCode::from(130)
    }
  }
}
