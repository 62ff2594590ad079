//! Schema migrations for the vehicle record store
//!
//! Idempotent; safe to run on every startup.

use sqlx::SqlitePool;

/// Run all migrations
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::debug!("Running vehicle store migrations...");

    // Exit fields move together, and only a record without exit data is active
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            plate TEXT NOT NULL CHECK (length(plate) BETWEEN 1 AND 8),
            model TEXT NOT NULL,
            color TEXT NOT NULL,
            entry_at TEXT NOT NULL,
            exit_at TEXT,
            fee_cents INTEGER,
            active INTEGER NOT NULL DEFAULT 1,
            CHECK ((exit_at IS NULL) = (fee_cents IS NULL)),
            CHECK ((active = 1) = (exit_at IS NULL))
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::debug!("Vehicle store migrations complete");
    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // At most one active record per plate
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_vehicles_active_plate ON vehicles(plate) WHERE active = 1",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_vehicles_plate ON vehicles(plate)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_vehicles_entry_at ON vehicles(entry_at)")
        .execute(pool)
        .await?;

    Ok(())
}
