use axum::{routing::any, Extension, Router};

use crate::kernel::Plugin;
use crate::plugins::metrics::MetricsPlugin;
use crate::plugins::stories::handlers::{dispatch, StoryListContext};
use crate::plugins::stories::sources::{DynMediaSource, DynStoryStore};

pub struct StoriesPlugin {
    ctx: StoryListContext,
}

impl StoriesPlugin {
    pub fn new(store: DynStoryStore, media: DynMediaSource) -> Self {
        Self { ctx: StoryListContext { store, media, metrics: None } }
    }

    pub fn with_metrics(mut self, metrics: MetricsPlugin) -> Self {
        self.ctx.metrics = Some(metrics);
        self
    }
}

#[async_trait::async_trait]
impl Plugin for StoriesPlugin {
    async fn router(&self) -> Router {
        Router::new()
            // any method; unknown actions still get the generic payload
            .route("/", any(dispatch))
            .layer(Extension(self.ctx.clone()))
    }

    fn name(&self) -> &'static str {
        "stories"
    }

    // the front end calls `/?action=...`
    fn mount_at_root(&self) -> bool {
        true
    }

    async fn on_start(&self) {
        tracing::info!("stories plugin started (actions: {})", crate::plugins::stories::handlers::ACTION_STORY_LIST);
    }
}
