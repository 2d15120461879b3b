use crate::kernel::Plugin;
use crate::plugins::stories::sources::DynStoryStore;
use axum::{routing::get, Extension, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

/// Reports whether the relational store answers.
pub struct HealthPlugin {
    store: DynStoryStore,
}

impl HealthPlugin {
    pub fn new(store: DynStoryStore) -> Self {
        Self { store }
    }
}

async fn health_handler(Extension(store): Extension<DynStoryStore>) -> Json<Health> {
    match store.ping().await {
        Ok(()) => Json(Health { status: "ok" }),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            Json(Health { status: "degraded" })
        }
    }
}

#[async_trait::async_trait]
impl Plugin for HealthPlugin {
    async fn router(&self) -> Router {
        Router::new()
            .route("/", get(health_handler))
            .layer(Extension(self.store.clone()))
    }

    fn name(&self) -> &'static str {
        "health"
    }

    async fn on_start(&self) {
        tracing::info!("health plugin started");
    }
}
