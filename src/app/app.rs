use axum::Router;
use std::sync::Arc;
use tracing::{info, warn, error};
use crate::config::{AdminUserConfig, AppConfig, MongoConfig, UploadConfig};
use crate::repository::{
    announcement_repo::MongoAnnouncementRepository,
    exchange_date_repo::MongoExchangeDateRepository,
    gift_repo::MongoGiftRepository,
    memory::{
        InMemoryAnnouncementRepository, InMemoryExchangeDateRepository, InMemoryGiftRepository,
        InMemoryUserRepository,
    },
    mongo,
    user_repo::UserRepositoryImpl,
};
use crate::router::create_router;
use crate::service::{
    announcement_service::AnnouncementServiceImpl,
    exchange_date_service::ExchangeDateServiceImpl,
    gift_service::GiftServiceImpl,
    user_service::{UserService, UserServiceImpl},
};
use crate::util::upload::UploadStore;

/// One service per resource, each holding its injected repository.
#[derive(Clone)]
pub struct AppServices {
    pub user_service: Arc<UserServiceImpl>,
    pub gift_service: Arc<GiftServiceImpl>,
    pub announcement_service: Arc<AnnouncementServiceImpl>,
    pub exchange_date_service: Arc<ExchangeDateServiceImpl>,
}

impl AppServices {
    pub fn from_database(db: &mongodb::Database, uploads: Arc<UploadStore>, keep_image_on_update: bool) -> Self {
        AppServices {
            user_service: Arc::new(UserServiceImpl::new(Arc::new(UserRepositoryImpl::new(db)))),
            gift_service: Arc::new(GiftServiceImpl::new(
                Arc::new(MongoGiftRepository::new(db)),
                uploads,
                keep_image_on_update,
            )),
            announcement_service: Arc::new(AnnouncementServiceImpl::new(Arc::new(
                MongoAnnouncementRepository::new(db),
            ))),
            exchange_date_service: Arc::new(ExchangeDateServiceImpl::new(Arc::new(
                MongoExchangeDateRepository::new(db),
            ))),
        }
    }

    /// Services over process-local storage; nothing survives a restart.
    pub fn in_memory(uploads: Arc<UploadStore>, keep_image_on_update: bool) -> Self {
        AppServices {
            user_service: Arc::new(UserServiceImpl::new(Arc::new(InMemoryUserRepository::new()))),
            gift_service: Arc::new(GiftServiceImpl::new(
                Arc::new(InMemoryGiftRepository::new()),
                uploads,
                keep_image_on_update,
            )),
            announcement_service: Arc::new(AnnouncementServiceImpl::new(Arc::new(
                InMemoryAnnouncementRepository::new(),
            ))),
            exchange_date_service: Arc::new(ExchangeDateServiceImpl::new(Arc::new(
                InMemoryExchangeDateRepository::new(),
            ))),
        }
    }
}

pub struct App {
    config: AppConfig,
    router: Router,
    pub services: AppServices,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env()?;
        let upload_config = UploadConfig::from_env()?;

        let db = mongo::connect(&mongo_config).await?;
        if mongo::ping(&db).await {
            mongo::ensure_indexes(&db).await;
            if let Err(e) = MongoExchangeDateRepository::new(&db).adopt_legacy().await {
                warn!("Could not adopt existing exchange date: {}", e);
            }
        } else {
            warn!("Starting without a reachable MongoDB; requests will fail until it is up");
        }

        let uploads = Arc::new(UploadStore::new(upload_config.dir.clone()).await?);
        let services = AppServices::from_database(&db, uploads, upload_config.keep_image_on_update);
        let router = create_router(&services, upload_config.max_bytes);

        let app = App { config, router, services };
        app.create_first_admin_user().await;
        Ok(app)
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let listener = tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        info!("Server is running on port {}", self.config.port);
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Server stopped");
        Ok(())
    }

    async fn create_first_admin_user(&self) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                info!("No admin user configured: {e}");
                return;
            }
        };
        if let Err(e) = self.services.user_service.bootstrap_admin(&admin_conf).await {
            error!("Failed to create admin user: {e}");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
