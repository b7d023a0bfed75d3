use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Variable con las directivas de log (`MOODMIX_LOG=moodmix_core=debug`).
pub const LOG_ENV: &str = "MOODMIX_LOG";

/// Logs a stderr; stdout queda reservado para la playlist.
pub fn init() {
  let filter = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).with_env_var(LOG_ENV).from_env_lossy();

  // Falla sólo si ya hay un subscriber global instalado.
  let _ = tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
    .with(filter)
    .try_init();
}
