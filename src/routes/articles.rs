use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use crate::model::{ArticlePayload, ListParameters};
use crate::routes::ApiError;
use crate::startup::ApplicationServices;

#[post("/article")]
#[tracing::instrument(skip(services, payload))]
pub async fn create_article(
    payload: web::Json<ArticlePayload>,
    services: web::Data<ApplicationServices>,
) -> Result<HttpResponse, ApiError> {
    let id = services
        .article_service
        .create_article(payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({"message": "Article created successfully", "id": id})))
}

#[get("/article")]
#[tracing::instrument(skip(services))]
pub async fn get_all_articles(
    query: web::Query<Vec<(String, String)>>,
    services: web::Data<ApplicationServices>,
) -> Result<HttpResponse, ApiError> {
    let params = ListParameters::from_pairs(query.into_inner());
    let page = services.article_service.list_articles(&params).await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("/article/{id}")]
#[tracing::instrument(skip(services))]
pub async fn get_article(
    id: web::Path<i64>,
    services: web::Data<ApplicationServices>,
) -> Result<HttpResponse, ApiError> {
    let article = services
        .article_service
        .get_article(id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(article))
}

/// The body is decoded only once the article is known to exist, so a missing article is a 404
/// whatever the body looks like.
#[put("/article/{id}")]
#[tracing::instrument(skip(services, body))]
pub async fn update_article(
    id: web::Path<i64>,
    body: Result<web::Bytes, actix_web::Error>,
    services: web::Data<ApplicationServices>,
) -> Result<HttpResponse, ApiError> {
    let service = &services.article_service;
    let article = service.get_article(id.into_inner()).await?;
    let body = body.map_err(ApiError::unreadable_body)?;
    let payload: ArticlePayload = serde_json::from_slice(&body).map_err(ApiError::malformed)?;

    service.update_article(article, payload).await?;

    Ok(HttpResponse::Ok().json(json!({"message": "Article updated successfully"})))
}

#[delete("/article/{id}")]
#[tracing::instrument(skip(services))]
pub async fn delete_article(
    id: web::Path<i64>,
    services: web::Data<ApplicationServices>,
) -> Result<HttpResponse, ApiError> {
    services
        .article_service
        .delete_article(id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({"message": "Article deleted successfully"})))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_article)
        .service(get_all_articles)
        .service(get_article)
        .service(update_article)
        .service(delete_article);
}
