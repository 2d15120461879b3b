use axum::Router;
use async_trait::async_trait;
use tracing::info;


#[async_trait]
pub trait Plugin: Send + Sync {

    async fn router(&self) -> Router;

    fn name(&self) -> &'static str;
    /// Merge the plugin's routes at `/` instead of nesting them under `/{name}`.
    fn mount_at_root(&self) -> bool {
        false
    }
    /// Optional lifecycle hook called when the kernel starts.
    async fn on_start(&self) {}
    /// Optional lifecycle hook called on shutdown.
    async fn on_shutdown(&self) {}
}

/// Builds the application router, mounting each plugin under `/{plugin.name()}` unless it asks for the root.
pub async fn build_app(plugins: &[Box<dyn Plugin>]) -> Router {
    let mut app = Router::new();

    for plugin in plugins.iter() {
        info!("starting plugin {}", plugin.name());
        plugin.on_start().await;
        let router = plugin.router().await;
        if plugin.mount_at_root() {
            app = app.merge(router);
        } else {
            app = app.nest(&format!("/{}", plugin.name()), router);
        }
    }

    app
}
