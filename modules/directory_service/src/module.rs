//! Module declaration and lifecycle: migrate, init, register REST

use crate::api::rest::auth::ApiKeyGuard;
use crate::config::Config;
use crate::domain::Service;
use crate::infra::storage::repositories::{
    SeaOrmActivityRepository, SeaOrmBuildingRepository, SeaOrmOrganizationRepository,
};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Directory service module
pub struct DirectoryServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for DirectoryServiceModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl DirectoryServiceModule {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            service: RwLock::new(None),
        }
    }

    /// Bring the schema up to date
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Directory service migrations completed");
        Ok(())
    }

    /// Build repositories and the domain service on top of `db`
    pub fn init(&self, db: DatabaseConnection) -> Result<()> {
        let cfg = self.config.read().clone();
        cfg.validate()?;

        let conn = Arc::new(db);

        // Build repositories
        let building_repo = Arc::new(SeaOrmBuildingRepository::new(conn.clone()));
        let activity_repo = Arc::new(SeaOrmActivityRepository::new(conn.clone()));
        let organization_repo = Arc::new(SeaOrmOrganizationRepository::new(conn));

        // Build domain service
        let service = Service::new(building_repo, activity_repo, organization_repo)
            .with_default_radius(cfg.default_radius_m);
        *self.service.write() = Some(Arc::new(service));

        tracing::info!(default_radius_m = cfg.default_radius_m, "Directory service initialized");
        Ok(())
    }

    /// Domain service, available after [`init`](Self::init)
    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client for other modules
    pub fn client(&self) -> Result<Arc<dyn crate::contract::DirectoryApi>> {
        Ok(Arc::new(crate::api::native::NativeClient::new(self.service()?)))
    }

    /// Mount the REST routes onto `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        let guard = ApiKeyGuard::new(self.config.read().api_key.as_str());

        tracing::info!("Registering directory service REST routes");
        crate::api::rest::routes::register_routes(router, service, guard)
    }
}
