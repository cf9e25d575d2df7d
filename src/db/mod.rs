pub mod mysql;
pub mod sqlite;

use crate::config::Config;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection};

pub type DbPool = DatabaseConnection;

/// Connects using the configured URL and makes sure the schema exists.
pub async fn create_pool(config: &Config) -> Result<DbPool, anyhow::Error> {
    let mut options = ConnectOptions::new(config.database.url.clone());
    if !config.is_in_memory() {
        options.max_connections(config.database.max_connections);
    }
    options.sqlx_logging_level(log::LevelFilter::Debug);

    log::info!("Connecting to {}", config.redacted_url());
    let db = Database::connect(options).await?;
    create_schema(&db).await?;
    Ok(db)
}

/// Connects to `url` with driver defaults and bootstraps the schema.
/// `sqlite::memory:` gives a fresh, private database.
pub async fn connect(url: &str) -> Result<DbPool, anyhow::Error> {
    let db = Database::connect(url).await?;
    create_schema(&db).await?;
    Ok(db)
}

/// Runs the `CREATE ... IF NOT EXISTS` statements for the connected backend.
pub async fn create_schema<C: ConnectionTrait>(db: &C) -> Result<(), anyhow::Error> {
    let backend = db.get_database_backend();
    let sql = match backend {
        DatabaseBackend::MySql => mysql::SCHEMA,
        DatabaseBackend::Sqlite => sqlite::SCHEMA,
        DatabaseBackend::Postgres => anyhow::bail!("Postgres is not supported"),
    };

    for statement in sql.split(';') {
        let statement = statement.trim();
        if !statement.is_empty() {
            let stmt = sea_orm::Statement::from_string(backend, statement.to_string());
            db.execute(stmt).await?;
        }
    }

    log::debug!("Schema ready for {:?}", backend);
    Ok(())
}
