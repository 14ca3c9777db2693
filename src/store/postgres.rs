use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::model::{Article, ArticleStatus, NewArticle};
use crate::store::{ArticleStore, Result, StoreError};

const SELECT_ARTICLES: &str = r#"
    SELECT id, title, content, category, status, created_date, updated_date
    FROM articles
"#;

/// Articles stored in the `articles` table
#[derive(Clone)]
pub struct PgArticleStore {
    db: PgPool,
}

impl PgArticleStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    #[tracing::instrument(skip(self, article), fields(title = %article.title))]
    async fn insert(&self, article: &NewArticle) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO articles (title, content, category, status, created_date, updated_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.category)
        .bind(article.status.as_str())
        .bind(article.created_date)
        .bind(article.updated_date)
        .fetch_one(&self.db)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    async fn count_filtered(&self, status: Option<ArticleStatus>) -> Result<i64> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM articles");
        add_filters(&mut query, status);

        let total = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.db)
            .await?;

        Ok(total)
    }

    #[tracing::instrument(skip(self))]
    async fn find_page(
        &self,
        limit: i64,
        offset: i64,
        status: Option<ArticleStatus>,
    ) -> Result<Vec<Article>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_ARTICLES);
        add_filters(&mut query, status);

        query.push(" ORDER BY id ");
        query.push(" LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let articles = query.build_query_as::<Article>().fetch_all(&self.db).await?;

        Ok(articles)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Article>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_ARTICLES);
        query.push(" WHERE id = ");
        query.push_bind(id);

        let article = query
            .build_query_as::<Article>()
            .fetch_optional(&self.db)
            .await?;

        Ok(article)
    }

    #[tracing::instrument(skip(self, article), fields(id = article.id))]
    async fn update(&self, article: &Article) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE articles
            SET title = $2, content = $3, category = $4, status = $5, updated_date = $6
            WHERE id = $1
            "#,
        )
        .bind(article.id)
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.category)
        .bind(article.status.as_str())
        .bind(article.updated_date)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(article.id));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM articles WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::debug!("Article {} deleted", id);

        Ok(())
    }
}

fn add_filters(query: &mut QueryBuilder<Postgres>, status: Option<ArticleStatus>) {
    if let Some(status) = status {
        query.push(" WHERE status = ");
        query.push_bind(status.as_str());
    }
}
