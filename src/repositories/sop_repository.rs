use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Sop,
    store::{DocumentStore, SOPS_DOCUMENT},
};

type SopsDocument = BTreeMap<String, Sop>;

#[async_trait]
pub trait SopRepository: Send + Sync {
    /// Create or replace wholesale, keyed by title. No versioning.
    async fn upsert(&self, title: &str, sop: Sop) -> AppResult<Sop>;
    async fn find_by_title(&self, title: &str) -> AppResult<Option<Sop>>;
    async fn find_all(&self) -> AppResult<Vec<(String, Sop)>>;
    async fn delete(&self, title: &str) -> AppResult<()>;
}

pub struct JsonSopRepository {
    store: Arc<DocumentStore>,
}

impl JsonSopRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> AppResult<SopsDocument> {
        self.store.load(SOPS_DOCUMENT)
    }
}

#[async_trait]
impl SopRepository for JsonSopRepository {
    async fn upsert(&self, title: &str, sop: Sop) -> AppResult<Sop> {
        let mut document = self.load()?;
        document.insert(title.to_string(), sop.clone());
        self.store.save(SOPS_DOCUMENT, &document)?;
        Ok(sop)
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Sop>> {
        Ok(self.load()?.remove(title))
    }

    async fn find_all(&self) -> AppResult<Vec<(String, Sop)>> {
        Ok(self.load()?.into_iter().collect())
    }

    async fn delete(&self, title: &str) -> AppResult<()> {
        let mut document = self.load()?;

        if document.remove(title).is_none() {
            return Err(AppError::NotFound(format!(
                "SOP with title '{}' not found",
                title
            )));
        }

        self.store.save(SOPS_DOCUMENT, &document)?;
        Ok(())
    }
}
