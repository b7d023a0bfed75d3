mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{BASE_DIR_ENV, ConfigError, MoodmixPaths};

use once_cell::sync::OnceCell;

static PATHS: OnceCell<MoodmixPaths> = OnceCell::new();
static CONFIG_BACKEND: OnceCell<TomlConfigBackend> = OnceCell::new();

/// Paths del proceso (portable o de sistema), resueltos la primera vez.
pub fn paths() -> Result<&'static MoodmixPaths, ConfigError> {
  PATHS.get_or_try_init(MoodmixPaths::detect)
}

/// Backend de configuración compartido por todo el proceso.
pub fn config_backend() -> Result<&'static TomlConfigBackend, ConfigError> {
  CONFIG_BACKEND.get_or_try_init(|| paths().map(|p| TomlConfigBackend::new(p.clone())))
}
