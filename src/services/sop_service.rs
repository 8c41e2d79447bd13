use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Sop,
    repositories::SopRepository,
    services::package_service::PackageService,
};

pub struct SopService {
    package_service: Arc<PackageService>,
    repository: Arc<dyn SopRepository>,
}

impl SopService {
    pub fn new(package_service: Arc<PackageService>, repository: Arc<dyn SopRepository>) -> Self {
        Self {
            package_service,
            repository,
        }
    }

    /// Derive a training package from the extracted SOP text and store the
    /// SOP under its title, replacing any previous record. When no package
    /// is produced the existing record is left untouched and the failure is
    /// surfaced as an upstream error.
    pub async fn upload_sop(&self, title: &str, text: &str) -> AppResult<Sop> {
        let package = self
            .package_service
            .generate(text)
            .await?
            .ok_or_else(|| {
                AppError::UpstreamError(
                    "No training package produced; SOP was not saved".to_string(),
                )
            })?;

        let sop = Sop::from_package(text, package);
        self.repository.upsert(title, sop).await
    }

    pub async fn get_sop(&self, title: &str) -> AppResult<Sop> {
        self.repository
            .find_by_title(title)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("SOP with title '{}' not found", title)))
    }

    pub async fn list_sops(&self) -> AppResult<Vec<(String, Sop)>> {
        self.repository.find_all().await
    }

    pub async fn delete_sop(&self, title: &str) -> AppResult<()> {
        self.repository.delete(title).await
    }
}
