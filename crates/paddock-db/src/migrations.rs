//! Schema migrations, compiled in from `migrations/sqlite`.
//!
//! `001_initial_schema.sql` creates `horses` and `cart_entries`. New files
//! take the next number; applied files are never edited.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies pending migrations and returns how many are now recorded.
pub(crate) async fn migrate(pool: &SqlitePool) -> DbResult<i64> {
    MIGRATOR.run(pool).await?;
    let applied = applied_count(pool).await?;

    info!(
        applied = applied,
        embedded = MIGRATOR.migrations.len(),
        "Schema up to date"
    );
    Ok(applied)
}

/// Rows in `_sqlx_migrations`. Errors if the table is missing.
pub(crate) async fn applied_count(pool: &SqlitePool) -> DbResult<i64> {
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;
    Ok(applied)
}
