//! Per-test PostgreSQL databases inside one shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};
use uuid::Uuid;

const TEST_USER: &str = "souq_test";
const TEST_PASSWORD: &str = "souq_test_password";

/// Container started by the first test and reused by the rest.
static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Databases queued for dropping once their `TestDb` goes away.
static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(TEST_USER)
        .with_password(TEST_PASSWORD)
        .with_db_name(TEST_USER)
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

async fn init_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(error) = drop_database(&name).await {
                eprintln!("Failed to drop test database '{name}': {error}");
            }
        }
    });

    sender
}

/// Connection URL for `database` on the shared container.
async fn database_url(database: &str) -> String {
    let container = POSTGRES_CONTAINER
        .get_or_init(init_postgres_container)
        .await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{TEST_USER}:{TEST_PASSWORD}@{host}:{port}/{database}")
}

async fn drop_database(name: &str) -> Result<(), sqlx::Error> {
    let mut conn = PgConnection::connect(&database_url("postgres").await).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A freshly migrated database owned by one test.
///
/// Services commit their own transactions, so isolation comes from every
/// test getting its own database rather than from rollback. The database is
/// dropped in the background when the value goes out of scope.
#[derive(Debug, Clone)]
pub(crate) struct TestDb {
    pool: PgPool,
    pub name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        CLEANUP_SENDER.get_or_init(init_cleanup_task).await;

        // Generated names only contain `[a-z0-9_]`, so quoting is enough.
        let name = format!("souq_test_{}", Uuid::now_v7().simple());

        let mut conn = PgConnection::connect(&database_url("postgres").await)
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&database_url(&name).await)
            .await
            .expect("Failed to create pool for test database");

        crate::database::MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations on test database");

        Self { pool, name }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_seed_promotion_settings() {
        let test_db = TestDb::new().await;

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM promotion_settings")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to count settings rows");

        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn each_test_gets_its_own_database() {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        assert_ne!(first.name, second.name);

        sqlx::query("INSERT INTO users (id) VALUES ('only-in-first')")
            .execute(first.pool())
            .await
            .expect("Failed to insert user");

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(second.pool())
            .await
            .expect("Failed to count users");

        assert_eq!(users, 0);
    }

    #[tokio::test]
    async fn applied_migrations_lists_every_embedded_migration() {
        let test_db = TestDb::new().await;

        let applied = crate::database::applied_migrations(test_db.pool())
            .await
            .expect("Failed to read applied migrations");

        let embedded: Vec<i64> = crate::database::MIGRATOR
            .iter()
            .map(|migration| migration.version)
            .collect();

        assert_eq!(applied, embedded);
    }
}
