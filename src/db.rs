//! Connection pool plumbing for the SQLite store.
//!
//! Every connection handed out by the pool has foreign keys enforced, a busy
//! timeout applied and the `great_circle_km` SQL function registered, so
//! repositories can filter by distance inside the query.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sql_types::Double;
use diesel::sqlite::SqliteConnection;

use crate::domain::geo::great_circle_distance_km;

diesel::define_sql_function! {
    /// Great-circle distance in kilometres between two points given in degrees.
    fn great_circle_km(lat1: Double, lon1: Double, lat2: Double, lon2: Double) -> Double;
}

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Sizing and timeout knobs for [`establish_connection_pool_with`].
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
    pub max_size: u32,
    /// Upper bound on waiting for a free connection.
    pub connection_timeout: Duration,
    /// How long SQLite waits on a locked database before failing a statement.
    pub busy_timeout_ms: u32,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 8,
            connection_timeout: Duration::from_secs(5),
            busy_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ConnectionCustomizer {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout_ms
        ))
        .map_err(diesel::r2d2::Error::QueryError)?;

        great_circle_km_utils::register_impl(conn, great_circle_distance_km)
            .map_err(diesel::r2d2::Error::QueryError)?;

        Ok(())
    }
}

/// Build a pool with default [`PoolOptions`].
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    establish_connection_pool_with(database_url, PoolOptions::default())
}

/// Build a pool for `database_url` (a file path or `file:` URI).
pub fn establish_connection_pool_with(
    database_url: &str,
    options: PoolOptions,
) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(options.max_size)
        .connection_timeout(options.connection_timeout)
        .connection_customizer(Box::new(ConnectionCustomizer {
            busy_timeout_ms: options.busy_timeout_ms,
        }))
        .build(manager)
}
