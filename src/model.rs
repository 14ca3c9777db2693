use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::ValidationErrors;

use crate::validation::{self, FieldSchema, FieldSource, Rule};

/// Accepted values of an article status, as they are stored and sent on the wire.
pub const STATUS_NAMES: &[&str] = &["publish", "draft", "trash"];

/// Default page size when the `limit` parameter is missing or unusable.
pub const DEFAULT_LIMIT: i64 = 10;

/// Constraints every article has to satisfy before being stored.
pub const ARTICLE_SCHEMA: &[FieldSchema] = &[
    FieldSchema {
        name: "title",
        rules: &[Rule::Required, Rule::MinLength(20)],
    },
    FieldSchema {
        name: "content",
        rules: &[Rule::Required, Rule::MinLength(200)],
    },
    FieldSchema {
        name: "category",
        rules: &[Rule::Required, Rule::MinLength(3)],
    },
    FieldSchema {
        name: "status",
        rules: &[Rule::Required, Rule::OneOf(STATUS_NAMES)],
    },
];

/// Publication state of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Publish,
    Draft,
    Trash,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Publish => "publish",
            ArticleStatus::Draft => "draft",
            ArticleStatus::Trash => "trash",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unknown article status {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for ArticleStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publish" => Ok(ArticleStatus::Publish),
            "draft" => Ok(ArticleStatus::Draft),
            "trash" => Ok(ArticleStatus::Trash),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

impl TryFrom<String> for ArticleStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A stored article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: ArticleStatus,
}

impl Article {
    /// Overwrite the editable fields, bumping `updated_date`. `id` and `created_date` are kept.
    pub fn revise(self, valid: ValidArticle) -> Article {
        let updated_date = next_update(self.updated_date);

        Article {
            title: valid.title,
            content: valid.content,
            category: valid.category,
            status: valid.status,
            updated_date,
            ..self
        }
    }
}

/// Article to be inserted, the store assigns the id
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: ArticleStatus,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl NewArticle {
    pub fn new(valid: ValidArticle) -> Self {
        let now = now();

        NewArticle {
            title: valid.title,
            content: valid.content,
            category: valid.category,
            status: valid.status,
            created_date: now,
            updated_date: now,
        }
    }
}

/// Article fields as sent by a client. Every field is optional: on creation a missing field is
/// an empty string, on update it keeps the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ArticlePayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl ArticlePayload {
    pub fn into_draft(self) -> ArticleDraft {
        ArticleDraft {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
        }
    }

    /// Lay the payload over an existing article
    pub fn apply_to(self, article: &Article) -> ArticleDraft {
        ArticleDraft {
            title: self.title.unwrap_or_else(|| article.title.clone()),
            content: self.content.unwrap_or_else(|| article.content.clone()),
            category: self.category.unwrap_or_else(|| article.category.clone()),
            status: self
                .status
                .unwrap_or_else(|| article.status.as_str().to_owned()),
        }
    }
}

/// Candidate article, not validated yet
#[derive(Debug, Clone, Default)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: String,
}

impl FieldSource for ArticleDraft {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "content" => Some(&self.content),
            "category" => Some(&self.category),
            "status" => Some(&self.status),
            _ => None,
        }
    }
}

impl ArticleDraft {
    /// Check the draft against [`ARTICLE_SCHEMA`]
    pub fn validate(self) -> Result<ValidArticle, ValidationErrors> {
        validation::validate(ARTICLE_SCHEMA, &self)?;

        let status = self
            .status
            .parse()
            .map_err(|_| validation::rejection("status", &Rule::OneOf(STATUS_NAMES)))?;

        Ok(ValidArticle {
            title: self.title,
            content: self.content,
            category: self.category,
            status,
        })
    }
}

/// Editable article fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidArticle {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: ArticleStatus,
}

/// Query parameters of the article listing. Values are kept raw so that unusable ones fall back
/// to their default instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParameters {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub status: Option<String>,
}

impl ListParameters {
    /// Pick the parameters out of the decoded query string. When a key is repeated, its first
    /// value is kept. Unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = ListParameters::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                "status" => &mut params.status,
                _ => continue,
            };
            slot.get_or_insert(value);
        }

        params
    }

    pub fn get_limit(&self) -> i64 {
        parse_non_negative(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT)
    }

    pub fn get_offset(&self) -> i64 {
        parse_non_negative(self.offset.as_deref()).unwrap_or(0)
    }

    /// `Ok(None)` when no filter is asked for
    pub fn get_status(&self) -> Result<Option<ArticleStatus>, UnknownStatus> {
        match self.status.as_deref() {
            None | Some("") => Ok(None),
            Some(status) => status.parse().map(Some),
        }
    }
}

fn parse_non_negative(value: Option<&str>) -> Option<i64> {
    value
        .and_then(|x| x.trim().parse::<i64>().ok())
        .filter(|x| *x >= 0)
}

/// A page of articles, along with the number of articles matching the query
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticlePage {
    pub total: i64,
    pub data: Vec<Article>,
}

impl ArticlePage {
    pub fn empty() -> Self {
        ArticlePage {
            total: 0,
            data: vec![],
        }
    }
}

/// Current time, at the precision kept by the database
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a new revision, always strictly after the previous one
fn next_update(previous: DateTime<Utc>) -> DateTime<Utc> {
    now().max(previous + Duration::microseconds(1))
}
