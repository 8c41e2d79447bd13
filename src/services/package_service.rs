use std::sync::Arc;

use crate::{
    constants::prompts::TRAINING_PACKAGE_PROMPT,
    errors::AppResult,
    models::domain::TrainingPackage,
    services::completion_client::{extract_json_payload, CompletionClient},
};

/// Derives a structured training package (summary, steps, warnings,
/// checklist) from raw SOP text via the completion service.
pub struct PackageService {
    client: Arc<dyn CompletionClient>,
}

impl PackageService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Returns `None` when the service is unavailable or its response does
    /// not parse into the expected shape. Callers must treat `None` as "no
    /// package produced" and leave the SOP record untouched. The service is
    /// asked for 6 steps, 4 warnings and 5 checklist items but counts in
    /// the response are not validated.
    pub async fn generate(&self, sop_text: &str) -> AppResult<Option<TrainingPackage>> {
        let prompt = format!("{}\n\nSOP:\n{}", TRAINING_PACKAGE_PROMPT, sop_text);

        let response = match self.client.complete(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("training package generation failed: {}", e);
                return Ok(None);
            }
        };

        let Some(payload) = extract_json_payload(&response) else {
            log::warn!("training package response contained no JSON");
            return Ok(None);
        };

        match serde_json::from_str::<TrainingPackage>(payload) {
            Ok(package) => Ok(Some(package)),
            Err(e) => {
                log::warn!("training package response did not match schema: {}", e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::services::completion_client::MockCompletionClient;

    fn service_returning(response: AppResult<String>) -> PackageService {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .times(1)
            .return_once(move |_| response);
        PackageService::new(Arc::new(client))
    }

    #[tokio::test]
    async fn parses_well_formed_package() {
        let body = r#"{
            "summary": "A 120-word summary.",
            "steps": ["s1", "s2"],
            "warnings": ["w1"],
            "checklist": ["c1", "c2", "c3"]
        }"#;
        let service = service_returning(Ok(body.to_string()));

        let package = service.generate("sop text").await.unwrap().unwrap();
        assert_eq!(package.steps, vec!["s1", "s2"]);
        assert_eq!(package.checklist.len(), 3);
    }

    #[tokio::test]
    async fn tolerates_counts_other_than_requested() {
        // Asked for 6/4/5; whatever comes back is accepted
        let body = r#"{"summary":"s","steps":["only one"],"warnings":[],"checklist":["c"]}"#;
        let service = service_returning(Ok(body.to_string()));

        let package = service.generate("sop text").await.unwrap().unwrap();
        assert_eq!(package.steps.len(), 1);
        assert!(package.warnings.is_empty());
    }

    #[tokio::test]
    async fn malformed_response_yields_none() {
        let service = service_returning(Ok("{\"summary\": \"no lists\"}".to_string()));
        assert!(service.generate("sop text").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn non_json_response_yields_none() {
        let service = service_returning(Ok("I could not process that document.".to_string()));
        assert!(service.generate("sop text").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn client_failure_yields_none_not_error() {
        let service =
            service_returning(Err(AppError::UpstreamError("connection refused".into())));
        assert!(service.generate("sop text").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn prompt_carries_sop_text() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|prompt: &str| prompt.contains("unique sop marker"))
            .times(1)
            .return_once(|_| Ok("not json".to_string()));
        let service = PackageService::new(Arc::new(client));

        let _ = service.generate("unique sop marker").await.unwrap();
    }
}
