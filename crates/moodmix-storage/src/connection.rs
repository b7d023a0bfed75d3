use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::error::StorageError;

pub type ConnectionPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type PooledConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Pragmas aplicados a cada conexión al salir del pool.
#[derive(Debug)]
struct ConnectionOptions {
  journal_mode: String,
  busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
    conn
      .batch_execute(&format!(
        "PRAGMA journal_mode = {}; PRAGMA busy_timeout = {}; PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;",
        self.journal_mode, self.busy_timeout_ms
      ))
      .map_err(r2d2::Error::QueryError)
  }
}

/// Abre (o crea) la base de datos, aplica migraciones pendientes y
/// devuelve un pool listo para usar.
pub fn open_pool(database_url: &str, config: &StorageConfig) -> Result<ConnectionPool, StorageError> {
  // Conexión de prueba para fallar pronto si la ruta no es accesible.
  let mut bootstrap =
    SqliteConnection::establish(database_url).map_err(|e| StorageError::Connection(e.to_string()))?;
  run_migrations(&mut bootstrap)?;
  drop(bootstrap);

  let manager = ConnectionManager::<SqliteConnection>::new(database_url);
  let pool = r2d2::Pool::builder()
    .max_size(config.pool_size.max(1))
    .connection_customizer(Box::new(ConnectionOptions {
      journal_mode: config.journal_mode.clone(),
      busy_timeout_ms: config.busy_timeout_ms,
    }))
    .build(manager)?;

  debug!(database_url, pool_size = config.pool_size, "sqlite pool ready");
  Ok(pool)
}

fn run_migrations(conn: &mut SqliteConnection) -> Result<(), StorageError> {
  let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| StorageError::Migration(e.to_string()))?;
  if !applied.is_empty() {
    info!(count = applied.len(), "database migrations applied");
  }
  Ok(())
}
