//! Database layer - connection pool, migrations and the vehicle repository
//!
//! # Design Principles
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Single-statement conditional writes for state transitions

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
pub use repos::*;

use sqlx::SqlitePool;

/// Open `database_url` and bring the schema up to date.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = create_pool(database_url).await?;
    migrations::run(&pool).await?;
    Ok(pool)
}

/// Fresh in-memory store with the schema applied.
pub async fn connect_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = create_memory_pool().await?;
    migrations::run(&pool).await?;
    Ok(pool)
}
