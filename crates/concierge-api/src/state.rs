//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST
//! API. Services are generic over repository traits; AppState pins them to
//! the SQLite implementations. The database pool is opened once here and
//! shared by every repository.

use std::path::PathBuf;
use std::sync::Arc;

use concierge_core::chat::service::ChatService;
use concierge_core::faq::service::FaqService;
use concierge_core::reply::build_reply_provider;
use concierge_infra::config::{load_config, resolve_data_dir};
use concierge_infra::sqlite::chat::SqliteChatRepository;
use concierge_infra::sqlite::faq::SqliteFaqRepository;
use concierge_infra::sqlite::pool::{database_url, DatabasePool};
use concierge_types::config::ServiceConfig;

pub type ConcreteChatService = ChatService<SqliteChatRepository>;

pub type ConcreteFaqService = FaqService<SqliteFaqRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub faq_service: Arc<ConcreteFaqService>,
    pub config: Arc<ServiceConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: resolve the data dir, load
    /// configuration, connect to the database, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        Ok(Self::from_parts(db_pool, config, data_dir))
    }

    /// Wire services over an already-open pool.
    pub fn from_parts(db_pool: DatabasePool, config: ServiceConfig, data_dir: PathBuf) -> Self {
        let replies = build_reply_provider(&config.chat);
        tracing::debug!(provider = replies.name(), "Reply provider selected");

        let chat_service = ChatService::new(SqliteChatRepository::new(db_pool.clone()), replies);
        let faq_service = FaqService::new(SqliteFaqRepository::new(db_pool.clone()));

        Self {
            chat_service: Arc::new(chat_service),
            faq_service: Arc::new(faq_service),
            config: Arc::new(config),
            data_dir,
            db_pool,
        }
    }
}
