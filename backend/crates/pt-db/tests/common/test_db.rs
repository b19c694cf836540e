use super::fixtures::test_digest;

use pt_core::{Identity, NewIdentity};
use pt_db::IdentityRepository;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    pt_db::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Inserts a local identity that problems and notes can hang off
pub async fn create_test_user(pool: &SqlitePool, email: &str) -> Identity {
    IdentityRepository::new(pool.clone())
        .insert(NewIdentity::local(email, "Test User".to_string(), test_digest()))
        .await
        .expect("Failed to create test user")
}
