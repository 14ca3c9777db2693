use std::net::TcpListener;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};

use crate::configuration::ApplicationConfiguration;
use crate::routes::{self, ApiError};
use crate::services::articles::ArticleService;
use crate::store::ArticleStore;

/// Preflight responses may be cached this long, in seconds
const CORS_MAX_AGE: usize = 12 * 60 * 60;

/// Largest accepted request body, for creations and updates alike
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Clone)]
pub struct ApplicationServices {
    pub article_service: ArticleService,
}

pub fn build_services(store: Arc<dyn ArticleStore>) -> ApplicationServices {
    ApplicationServices {
        article_service: ArticleService::new(store),
    }
}

/// Register the services, the extractors error handling and the routes
pub fn configure(cfg: &mut web::ServiceConfig, services: Data<ApplicationServices>) {
    let json_config = web::JsonConfig::default()
        .limit(BODY_LIMIT)
        .content_type_required(false)
        .error_handler(|err, _req| ApiError::unreadable_body(err).into());
    let payload_config = web::PayloadConfig::new(BODY_LIMIT);
    let query_config =
        web::QueryConfig::default().error_handler(|err, _req| ApiError::malformed(err).into());
    let path_config =
        web::PathConfig::default().error_handler(|_err, _req| ApiError::ArticleNotFound.into());

    cfg.app_data(services)
        .app_data(json_config)
        .app_data(payload_config)
        .app_data(query_config)
        .app_data(path_config)
        .configure(routes::configure);
}

/// Cross origin policy. A `*` in the allowed origins lets any origin in.
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            header::ORIGIN,
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
        .max_age(CORS_MAX_AGE);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

pub async fn startup(
    store: Arc<dyn ArticleStore>,
    configuration: ApplicationConfiguration,
    listener: TcpListener,
) -> std::io::Result<()> {
    let services = Data::new(build_services(store));
    let allowed_origins = configuration.cors_origins;

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&allowed_origins))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(|cfg| configure(cfg, services.clone()))
    })
    .listen(listener)?
    .run()
    .await
}
