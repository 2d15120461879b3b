use async_trait::async_trait;
use std::sync::Arc;

use crate::error::SourceError;
use crate::plugins::stories::models::{Author, Media, Story};

/// Relational side: stories and authors.
#[async_trait]
pub trait StoryStore: Send + Sync {
    async fn fetch_stories(&self) -> Result<Vec<Story>, SourceError>;

    async fn fetch_authors(&self) -> Result<Vec<Author>, SourceError>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<(), SourceError>;
}

/// Remote media feed. An empty vector means the call succeeded with no entries.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn fetch_media(&self) -> Result<Vec<Media>, SourceError>;
}

pub type DynStoryStore = Arc<dyn StoryStore>;
pub type DynMediaSource = Arc<dyn MediaSource>;
