use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::SourceError;
use crate::plugins::stories::models::{Author, Story};
use crate::plugins::stories::sources::StoryStore;

pub struct PgStoryStore {
    pool: PgPool,
}

impl PgStoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub async fn list_stories(pool: &PgPool) -> Result<Vec<Story>, sqlx::Error> {
    sqlx::query_as::<_, Story>("SELECT id, title, author_id, date_published::text AS date_published FROM stories ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn list_authors(pool: &PgPool) -> Result<Vec<Author>, sqlx::Error> {
    sqlx::query_as::<_, Author>("SELECT id, full_name FROM authors ORDER BY id")
        .fetch_all(pool)
        .await
}

#[async_trait]
impl StoryStore for PgStoryStore {
    async fn fetch_stories(&self) -> Result<Vec<Story>, SourceError> {
        list_stories(&self.pool).await.map_err(|e| SourceError::unavailable("stories", e))
    }

    async fn fetch_authors(&self) -> Result<Vec<Author>, SourceError> {
        list_authors(&self.pool).await.map_err(|e| SourceError::unavailable("authors", e))
    }

    async fn ping(&self) -> Result<(), SourceError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| SourceError::unavailable("stories", e))
    }
}
