use axum::extract::Query;
use axum::{Extension, Json};
use std::collections::HashMap;

use crate::http_error::AppError;
use crate::plugins::metrics::MetricsPlugin;
use crate::plugins::stories::engine::{assemble, StoryList};
use crate::plugins::stories::models::OutputStory;
use crate::plugins::stories::sources::{DynMediaSource, DynStoryStore};

pub const ACTION_STORY_LIST: &str = "story_list";

/// Request-scoped dependencies of the story list endpoint.
#[derive(Clone)]
pub struct StoryListContext {
    pub store: DynStoryStore,
    pub media: DynMediaSource,
    pub metrics: Option<MetricsPlugin>,
}

impl StoryListContext {
    /// Fetches all three sources concurrently and joins them. Any source failure fails the whole call.
    pub async fn load(&self) -> Result<StoryList, AppError> {
        let (stories, authors, media) = tokio::try_join!(
            self.store.fetch_stories(),
            self.store.fetch_authors(),
            self.media.fetch_media(),
        )?;

        let list = assemble(&stories, &authors, &media);
        for d in &list.diagnostics {
            tracing::warn!(story_id = d.story_id, field = d.field.as_str(), "dropping unformattable field: {}", d.error);
            if let Some(m) = &self.metrics {
                m.record_format_error(d.field.as_str());
            }
        }
        tracing::info!(stories = list.stories.len(), media = media.len(), "story list built");
        Ok(list)
    }

    fn record(&self, outcome: &str) {
        if let Some(m) = &self.metrics {
            m.record_request(outcome);
        }
    }
}

pub async fn dispatch(
    Extension(ctx): Extension<StoryListContext>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<OutputStory>>, AppError> {
    match params.get("action").map(String::as_str) {
        Some(ACTION_STORY_LIST) => match ctx.load().await {
            Ok(list) => {
                ctx.record("ok");
                Ok(Json(list.stories))
            }
            Err(e) => {
                ctx.record("source_unavailable");
                Err(e)
            }
        },
        other => {
            ctx.record("unknown_action");
            Err(AppError::new(format!("unsupported action {:?}", other)).with_code("unknown_action"))
        }
    }
}
