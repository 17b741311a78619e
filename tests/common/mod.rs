//! Helpers for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use serde_json::json;
use tasteranker::db::{DbPool, establish_connection_pool};
use tasteranker::forms::places::{ExternalPlaceRecord, Geometry, LatLng};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Provider record for `place_id` positioned at (`lat`, `lng`).
#[allow(dead_code)]
pub fn place_record(place_id: &str, lat: f64, lng: f64) -> ExternalPlaceRecord {
    ExternalPlaceRecord {
        place_id: place_id.to_string(),
        name: "Wharf Co".to_string(),
        rating: 4.6,
        user_ratings: 1532,
        price_level: 2,
        types: vec!["restaurant".to_string()],
        geometry: Geometry {
            location: LatLng { lat, lng },
        },
        formatted_address: Some("1 Cabot Square, London".to_string()),
        opening_hours: Some(json!({"open_now": true})),
        website: Some("https://wharf.example.com".to_string()),
        international_phone_number: Some("+44 20 7946 0000".to_string()),
    }
}
