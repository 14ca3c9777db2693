use async_trait::async_trait;

use crate::model::{Article, ArticleStatus, NewArticle};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryArticleStore;
pub use postgres::PgArticleStore;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Article {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence of articles.
///
/// A `None` status filter matches every article. Lookups report absence with `None`, while
/// writes on a missing id fail with [`StoreError::NotFound`].
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert an article, returning the id it was given
    async fn insert(&self, article: &NewArticle) -> Result<i64>;

    /// Number of articles matching the filter
    async fn count_filtered(&self, status: Option<ArticleStatus>) -> Result<i64>;

    /// Up to `limit` articles matching the filter, skipping the first `offset`, in insertion order
    async fn find_page(
        &self,
        limit: i64,
        offset: i64,
        status: Option<ArticleStatus>,
    ) -> Result<Vec<Article>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Article>>;

    /// Overwrite the editable fields and `updated_date` of the article with the same id
    async fn update(&self, article: &Article) -> Result<()>;

    async fn delete_by_id(&self, id: i64) -> Result<()>;
}
