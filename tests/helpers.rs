use std::sync::Arc;

use actix_web::web::Data;
use async_trait::async_trait;
use serde_json::{json, Value};

use article_api::model::{Article, ArticleStatus, NewArticle};
use article_api::startup::{build_services, ApplicationServices};
use article_api::store::{ArticleStore, InMemoryArticleStore, Result, StoreError};

/// Build an app on top of an in-memory store, without the CORS and logging middlewares
macro_rules! spawn_app {
    ($services:expr) => {
        actix_web::test::init_service(actix_web::App::new().configure(|cfg| {
            article_api::startup::configure(cfg, $services.clone())
        }))
        .await
    };
}

pub fn configure_services() -> (Arc<InMemoryArticleStore>, Data<ApplicationServices>) {
    let store = Arc::new(InMemoryArticleStore::new());
    let services = Data::new(build_services(store.clone()));

    (store, services)
}

/// Store whose database is never reachable
pub struct UnreachableStore;

fn unreachable<T>() -> Result<T> {
    Err(StoreError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl ArticleStore for UnreachableStore {
    async fn insert(&self, _article: &NewArticle) -> Result<i64> {
        unreachable()
    }

    async fn count_filtered(&self, _status: Option<ArticleStatus>) -> Result<i64> {
        unreachable()
    }

    async fn find_page(
        &self,
        _limit: i64,
        _offset: i64,
        _status: Option<ArticleStatus>,
    ) -> Result<Vec<Article>> {
        unreachable()
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Article>> {
        unreachable()
    }

    async fn update(&self, _article: &Article) -> Result<()> {
        unreachable()
    }

    async fn delete_by_id(&self, _id: i64) -> Result<()> {
        unreachable()
    }
}

pub fn configure_unreachable_services() -> Data<ApplicationServices> {
    Data::new(build_services(Arc::new(UnreachableStore)))
}

/// Body of an article passing every validation rule, at the exact minimum lengths
pub fn valid_article(status: &str) -> Value {
    json!({
        "title": "t".repeat(20),
        "content": "c".repeat(200),
        "category": "news",
        "status": status,
    })
}

pub fn article_with(field: &str, value: Value) -> Value {
    let mut article = valid_article("draft");
    article[field] = value;
    article
}

/// Create an article through the API, returning its id
macro_rules! create_article {
    ($app:expr, $body:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/article")
            .set_json($body)
            .to_request();
        let body: serde_json::Value = actix_web::test::call_and_read_body_json(&$app, req).await;
        body["id"].as_i64().expect("the id of the created article")
    }};
}
