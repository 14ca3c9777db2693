use secrecy::ExposeSecret;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::configuration::ApplicationConfiguration;

pub mod configuration;
pub mod model;
pub mod observability;
pub mod routes;
pub mod services;
pub mod startup;
pub mod store;
pub mod validation;

/// Creates the `articles` table when it does not exist yet
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Build the Postgres connection pool
pub async fn init_postgres_connection(
    configuration: &ApplicationConfiguration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(configuration.max_connections)
        .connect(configuration.database_url.expose_secret())
        .await
}
