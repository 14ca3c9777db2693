use std::env;
use std::str::FromStr;

use actix_web::http::Uri;
use secrecy::Secret;

const DEFAULT_LISTEN_ON: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173,*";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{0} environment variable is mandatory")]
    Missing(&'static str),
    #[error("Invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// # Application configuration, read from the environment
#[derive(Debug, Clone)]
pub struct ApplicationConfiguration {
    /// Address the HTTP server binds to
    pub listen_on: String,
    pub database_url: Secret<String>,
    /// Size of the postgres connection pool
    pub max_connections: u32,
    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,
    pub log_format: LogFormat,
}

impl ApplicationConfiguration {
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|x| !x.is_empty())
            .ok_or(ConfigurationError::Missing("DATABASE_URL"))?;

        let listen_on =
            lookup("ARTICLE_API_LISTEN_ON").unwrap_or_else(|| DEFAULT_LISTEN_ON.to_owned());

        let max_connections = match lookup("ARTICLE_API_DB_MAX_CONNECTIONS") {
            Some(value) => parse("ARTICLE_API_DB_MAX_CONNECTIONS", &value)
                .filter(|x: &u32| *x > 0)
                .ok_or(ConfigurationError::Invalid {
                    name: "ARTICLE_API_DB_MAX_CONNECTIONS",
                    value,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let cors_origins = parse_origins(
            &lookup("ARTICLE_API_CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_owned()),
        )?;

        let log_format = match lookup("ARTICLE_API_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(ApplicationConfiguration {
            listen_on,
            database_url: Secret::new(database_url),
            max_connections,
            cors_origins,
            log_format,
        })
    }
}

fn parse<T: FromStr>(name: &'static str, value: &str) -> Option<T> {
    value
        .trim()
        .parse()
        .map_err(|_| tracing::debug!("Could not parse {} from {:?}", name, value))
        .ok()
}

/// Split a comma separated origin list. Every origin but `*` needs a scheme and a host.
fn parse_origins(value: &str) -> Result<Vec<String>, ConfigurationError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            let valid = origin == "*"
                || origin
                    .parse::<Uri>()
                    .map(|uri| uri.scheme().is_some() && uri.host().is_some())
                    .unwrap_or(false);

            if valid {
                Ok(origin.to_owned())
            } else {
                Err(ConfigurationError::Invalid {
                    name: "ARTICLE_API_CORS_ORIGINS",
                    value: origin.to_owned(),
                })
            }
        })
        .collect()
}
