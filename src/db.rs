use sqlx::AnyPool;
use sqlx::any::{AnyPoolOptions, install_default_drivers};

// MySQL in deployment, SQLite in tests; the DDL below is valid for both.
static SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        username        VARCHAR(191) NOT NULL PRIMARY KEY,
        hashed_password VARCHAR(255) NOT NULL,
        email           VARCHAR(255) NOT NULL DEFAULT '',
        full_name       VARCHAR(255) NOT NULL DEFAULT '',
        disabled        BIGINT NOT NULL DEFAULT 0
    )
    "#,
    // no uniqueness on id: repeated registrations are kept as separate rows,
    // `seq` numbers them in registration order
    r#"
    CREATE TABLE IF NOT EXISTS students (
        seq         BIGINT NOT NULL,
        id          VARCHAR(191) NOT NULL,
        name        VARCHAR(255) NOT NULL,
        class_name  VARCHAR(255) NOT NULL,
        facial_data BLOB NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        date        VARCHAR(10) NOT NULL,
        student_id  VARCHAR(191) NOT NULL,
        status      VARCHAR(64) NOT NULL,
        recorded_at VARCHAR(32) NOT NULL,
        method      VARCHAR(64) NOT NULL
    )
    "#,
];

pub async fn init_db(database_url: &str) -> Result<AnyPool, sqlx::Error> {
    install_default_drivers();
    AnyPool::connect(database_url).await
}

/// Single-connection pool over a private in-memory SQLite database.
pub async fn init_memory_db() -> Result<AnyPool, sqlx::Error> {
    install_default_drivers();
    AnyPoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

pub async fn ensure_schema(pool: &AnyPool) -> Result<(), sqlx::Error> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}
