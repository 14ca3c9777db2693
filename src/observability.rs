use tracing::{subscriber::set_global_default, Subscriber};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

use crate::configuration::LogFormat;

/// Build the subscriber. `RUST_LOG` wins over the given default filter.
pub fn get_subscriber(env_filter: &str, format: LogFormat) -> impl Subscriber + Sync + Send {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    let (json, pretty) = match format {
        LogFormat::Json => (Some(fmt::Layer::new().json()), None),
        LogFormat::Pretty => (None, Some(fmt::Layer::new())),
    };

    Registry::default().with(env_filter).with(json).with(pretty)
}

pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    LogTracer::init()?;
    set_global_default(subscriber)?;

    Ok(())
}
