use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::model::{Article, ArticleStatus, NewArticle};
use crate::store::{ArticleStore, Result, StoreError};

/// Articles kept in memory, ids are never reused
#[derive(Default)]
pub struct InMemoryArticleStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    articles: BTreeMap<i64, Article>,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn matches(article: &Article, status: Option<ArticleStatus>) -> bool {
    status.map(|x| article.status == x).unwrap_or(true)
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn insert(&self, article: &NewArticle) -> Result<i64> {
        let mut state = self.lock();
        state.last_id += 1;
        let id = state.last_id;

        state.articles.insert(
            id,
            Article {
                id,
                title: article.title.clone(),
                content: article.content.clone(),
                category: article.category.clone(),
                created_date: article.created_date,
                updated_date: article.updated_date,
                status: article.status,
            },
        );

        Ok(id)
    }

    async fn count_filtered(&self, status: Option<ArticleStatus>) -> Result<i64> {
        let count = self
            .lock()
            .articles
            .values()
            .filter(|article| matches(article, status))
            .count();

        Ok(count as i64)
    }

    async fn find_page(
        &self,
        limit: i64,
        offset: i64,
        status: Option<ArticleStatus>,
    ) -> Result<Vec<Article>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let offset = usize::try_from(offset).unwrap_or(0);

        Ok(self
            .lock()
            .articles
            .values()
            .filter(|article| matches(article, status))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Article>> {
        Ok(self.lock().articles.get(&id).cloned())
    }

    async fn update(&self, article: &Article) -> Result<()> {
        let mut state = self.lock();
        let stored = state
            .articles
            .get_mut(&article.id)
            .ok_or(StoreError::NotFound(article.id))?;

        stored.title = article.title.clone();
        stored.content = article.content.clone();
        stored.category = article.category.clone();
        stored.status = article.status;
        stored.updated_date = article.updated_date;

        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.lock()
            .articles
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
