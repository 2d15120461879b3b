use async_trait::async_trait;
use axum::{routing::get, Json, Router};
use std::process::Command;
use std::time::Duration;
use tokio::net::TcpListener;

use storyfeed_api_kernel::config::AppConfig;
use storyfeed_api_kernel::db;
use storyfeed_api_kernel::error::SourceError;
use storyfeed_api_kernel::kernel::{build_app, Plugin};
use storyfeed_api_kernel::plugins::stories::models::{Author, Media, Story};
use storyfeed_api_kernel::plugins::stories::sources::{MediaSource, StoryStore};

/// Fixed snapshots standing in for the database and the media service.
#[derive(Debug, Clone, Default)]
pub struct StaticSources {
    pub stories: Vec<Story>,
    pub authors: Vec<Author>,
    pub media: Vec<Media>,
}

#[async_trait]
impl StoryStore for StaticSources {
    async fn fetch_stories(&self) -> Result<Vec<Story>, SourceError> {
        Ok(self.stories.clone())
    }

    async fn fetch_authors(&self) -> Result<Vec<Author>, SourceError> {
        Ok(self.authors.clone())
    }

    async fn ping(&self) -> Result<(), SourceError> {
        Ok(())
    }
}

#[async_trait]
impl MediaSource for StaticSources {
    async fn fetch_media(&self) -> Result<Vec<Media>, SourceError> {
        Ok(self.media.clone())
    }
}

pub struct TestDbGuard {
    maintenance_url: String,
    unique_db: String,
}

impl TestDbGuard {
    pub fn new(maintenance_url: String, unique_db: String) -> Self {
        Self { maintenance_url, unique_db }
    }
}

impl Drop for TestDbGuard {
    fn drop(&mut self) {
        let _ = Command::new("psql")
            .arg(&self.maintenance_url)
            .arg("-c")
            .arg(format!(
                "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}' AND pid <> pg_backend_pid();",
                self.unique_db
            ))
            .status();
        let _ = Command::new("psql")
            .arg(&self.maintenance_url)
            .arg("-c")
            .arg(format!("DROP DATABASE IF EXISTS \"{}\"", self.unique_db))
            .status();
    }
}

/// `None` when TEST_DATABASE_URL is unset; callers skip.
pub fn test_database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL").ok()
}

pub async fn create_test_db_and_pool(test_db: &str) -> anyhow::Result<(sqlx::PgPool, TestDbGuard)> {
    let mut maintenance_url = test_db.to_string();
    if let Some(idx) = maintenance_url.rfind('/') {
        maintenance_url.replace_range(idx + 1.., "postgres");
    }
    let base_db_name = test_db.rsplit('/').next().unwrap().split('?').next().unwrap();
    let unique_db = format!("{}_{}", base_db_name, uuid::Uuid::new_v4().to_string().replace('-', ""));
    let mut unique_db_url = test_db.to_string();
    if let Some(idx) = unique_db_url.rfind('/') {
        unique_db_url.replace_range(idx + 1.., &unique_db);
    }
    let _ = Command::new("psql").arg(&maintenance_url).arg("-c").arg(format!("DROP DATABASE IF EXISTS \"{}\"", unique_db)).status();
    let _ = Command::new("psql").arg(&maintenance_url).arg("-c").arg(format!("CREATE DATABASE \"{}\"", unique_db)).status();
    let guard = TestDbGuard::new(maintenance_url, unique_db);
    let pool = db::init_db(&unique_db_url, 2).await?;
    Ok((pool, guard))
}

pub async fn spawn_router(app: Router) -> anyhow::Result<(String, tokio::task::JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });
    Ok((format!("http://{}", addr), server_handle))
}

pub async fn spawn_app_with_plugins(plugins: Vec<Box<dyn Plugin>>) -> anyhow::Result<(String, tokio::task::JoinHandle<()>)> {
    let app = build_app(&plugins).await;
    spawn_router(app).await
}

/// Stand-in for the remote media service, answering `GET /stories/media` with `payload`.
pub async fn spawn_media_service(payload: serde_json::Value) -> anyhow::Result<(String, tokio::task::JoinHandle<()>)> {
    let app = Router::new().route("/stories/media", get(move || {
        let payload = payload.clone();
        async move { Json(payload) }
    }));
    let (base, handle) = spawn_router(app).await?;
    Ok((format!("{}/stories/media", base), handle))
}

pub fn media_config(endpoint: &str) -> AppConfig {
    AppConfig {
        media_endpoint: endpoint.to_string(),
        media_connect_timeout: Duration::from_secs(1),
        media_read_timeout: Duration::from_secs(1),
        ..AppConfig::default()
    }
}
