use std::sync::Arc;

use crate::model::{Article, ArticlePage, ArticlePayload, ListParameters, NewArticle};
use crate::services::ServiceError;
use crate::store::ArticleStore;

#[derive(Clone)]
pub struct ArticleService {
    store: Arc<dyn ArticleStore>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    /// Validate and store a new article, returning its id
    #[tracing::instrument(skip_all)]
    pub async fn create_article(&self, payload: ArticlePayload) -> Result<i64, ServiceError> {
        let valid = payload.into_draft().validate()?;
        let id = self.store.insert(&NewArticle::new(valid)).await?;

        tracing::debug!("Article {} created", id);

        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_articles(&self, params: &ListParameters) -> Result<ArticlePage, ServiceError> {
        let status = match params.get_status() {
            Ok(status) => status,
            Err(unknown) => {
                tracing::debug!("{}, nothing can match", unknown);
                return Ok(ArticlePage::empty());
            }
        };

        let total = self.store.count_filtered(status).await?;
        let data = self
            .store
            .find_page(params.get_limit(), params.get_offset(), status)
            .await?;

        Ok(ArticlePage { total, data })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_article(&self, id: i64) -> Result<Article, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Lay the payload over an already fetched article, then validate and store the result
    #[tracing::instrument(skip_all, fields(id = article.id))]
    pub async fn update_article(
        &self,
        article: Article,
        payload: ArticlePayload,
    ) -> Result<(), ServiceError> {
        let valid = payload.apply_to(&article).validate()?;
        let revised = article.revise(valid);

        self.store.update(&revised).await?;

        tracing::debug!("Article {} updated", revised.id);

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_article(&self, id: i64) -> Result<(), ServiceError> {
        self.get_article(id).await?;
        self.store.delete_by_id(id).await?;

        Ok(())
    }
}
