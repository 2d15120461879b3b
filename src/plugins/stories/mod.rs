pub mod engine;
pub mod format;
pub mod handlers;
pub mod media_client;
pub mod models;
pub mod plugin;
pub mod repo;
pub mod sources;

pub use media_client::HttpMediaClient;
pub use plugin::StoriesPlugin;
pub use repo::PgStoryStore;
