use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use storyfeed_api_kernel::config::AppConfig;
use storyfeed_api_kernel::db;
use storyfeed_api_kernel::kernel::{build_app, Plugin};
use storyfeed_api_kernel::plugins::health::HealthPlugin;
use storyfeed_api_kernel::plugins::metrics::MetricsPlugin;
use storyfeed_api_kernel::plugins::stories::sources::{DynMediaSource, DynStoryStore};
use storyfeed_api_kernel::plugins::stories::{HttpMediaClient, PgStoryStore, StoriesPlugin};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let pool = db::init_from_config(&config).await?;

    let store: DynStoryStore = Arc::new(PgStoryStore::new(pool.clone()));
    let metrics_plugin = MetricsPlugin::new()?;
    let media_client = HttpMediaClient::new(&config)?.with_metrics(metrics_plugin.clone());
    tracing::info!("media endpoint: {}", media_client.endpoint());
    let media: DynMediaSource = Arc::new(media_client);

    let stories_plugin = StoriesPlugin::new(store.clone(), media).with_metrics(metrics_plugin.clone());
    let plugins_vec: Vec<Box<dyn Plugin>> = vec![
        Box::new(HealthPlugin::new(store)),
        Box::new(stories_plugin),
    ];

    let plugin_names: Vec<&'static str> = plugins_vec.iter().map(|p| p.name()).collect();
    tracing::info!("mounting plugins: {:?}", plugin_names);

    let mut app: Router = build_app(&plugins_vec).await;
    app = app.nest("/metrics", metrics_plugin.router());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            for p in plugins_vec.iter() {
                p.on_shutdown().await;
            }
            pool.close().await;
        })
        .await?;

    Ok(())
}
