use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use article_api::configuration::ApplicationConfiguration;
use article_api::store::PgArticleStore;
use article_api::{init_postgres_connection, observability, startup, MIGRATOR};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init dotenv
    dotenvy::dotenv().ok();

    let configuration = ApplicationConfiguration::from_env().context("Invalid configuration")?;

    let subscriber = observability::get_subscriber("info", configuration.log_format);
    observability::init_subscriber(subscriber).context("Could not set up logging")?;

    let postgres_connection = init_postgres_connection(&configuration)
        .await
        .context("Could not connect to postgres")?;

    MIGRATOR
        .run(&postgres_connection)
        .await
        .context("Could not create the articles table")?;

    let listener = TcpListener::bind(&configuration.listen_on)
        .with_context(|| format!("Could not listen on {}", configuration.listen_on))?;
    info!("Listening on {}", configuration.listen_on);

    let store = Arc::new(PgArticleStore::new(postgres_connection));
    startup::startup(store, configuration, listener).await?;

    Ok(())
}
