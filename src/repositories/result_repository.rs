use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    errors::AppResult,
    models::domain::ResultProfile,
    store::{DocumentStore, RESULTS_DOCUMENT},
};

/// username -> SOP title -> profile.
pub type ResultsDocument = BTreeMap<String, BTreeMap<String, ResultProfile>>;

#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn find(&self, username: &str, sop_title: &str) -> AppResult<Option<ResultProfile>>;
    /// Lazily create an empty profile the first time a trainee opens an SOP.
    /// The empty profile is persisted immediately.
    async fn get_or_create(&self, username: &str, sop_title: &str) -> AppResult<ResultProfile>;
    async fn save(
        &self,
        username: &str,
        sop_title: &str,
        profile: ResultProfile,
    ) -> AppResult<()>;
    async fn find_by_username(
        &self,
        username: &str,
    ) -> AppResult<BTreeMap<String, ResultProfile>>;
    async fn find_all(&self) -> AppResult<ResultsDocument>;
}

pub struct JsonResultRepository {
    store: Arc<DocumentStore>,
}

impl JsonResultRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> AppResult<ResultsDocument> {
        self.store.load(RESULTS_DOCUMENT)
    }
}

#[async_trait]
impl ResultRepository for JsonResultRepository {
    async fn find(&self, username: &str, sop_title: &str) -> AppResult<Option<ResultProfile>> {
        let document = self.load()?;
        Ok(document
            .get(username)
            .and_then(|per_sop| per_sop.get(sop_title))
            .cloned())
    }

    async fn get_or_create(&self, username: &str, sop_title: &str) -> AppResult<ResultProfile> {
        let mut document = self.load()?;
        let per_sop = document.entry(username.to_string()).or_default();

        if let Some(profile) = per_sop.get(sop_title) {
            return Ok(profile.clone());
        }

        let profile = ResultProfile::default();
        per_sop.insert(sop_title.to_string(), profile.clone());
        self.store.save(RESULTS_DOCUMENT, &document)?;
        Ok(profile)
    }

    async fn save(
        &self,
        username: &str,
        sop_title: &str,
        profile: ResultProfile,
    ) -> AppResult<()> {
        let mut document = self.load()?;
        document
            .entry(username.to_string())
            .or_default()
            .insert(sop_title.to_string(), profile);
        self.store.save(RESULTS_DOCUMENT, &document)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> AppResult<BTreeMap<String, ResultProfile>> {
        let document = self.load()?;
        Ok(document.get(username).cloned().unwrap_or_default())
    }

    async fn find_all(&self) -> AppResult<ResultsDocument> {
        self.load()
    }
}
