use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::{
        JsonResultRepository, JsonSopRepository, JsonUserRepository, ResultRepository,
    },
    services::{
        CompletionClient, GroqCompletionClient, PackageService, QuizGenService, QuizRunner,
        SopService, UserService,
    },
    store::DocumentStore,
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub sop_service: Arc<SopService>,
    pub quiz_runner: Arc<QuizRunner>,
    pub result_repository: Arc<dyn ResultRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let client: Arc<dyn CompletionClient> = Arc::new(GroqCompletionClient::new(&config));
        Self::with_completion_client(config, client).await
    }

    /// Wiring entry point that lets tests substitute the completion client.
    pub async fn with_completion_client(
        config: Config,
        client: Arc<dyn CompletionClient>,
    ) -> AppResult<Self> {
        let store = Arc::new(DocumentStore::open(&config.data_dir)?);

        let user_repository = Arc::new(JsonUserRepository::new(Arc::clone(&store)));
        let user_service = Arc::new(UserService::new(user_repository));
        user_service.seed_initial_users(&config).await?;

        let sop_repository = Arc::new(JsonSopRepository::new(Arc::clone(&store)));
        let result_repository: Arc<dyn ResultRepository> =
            Arc::new(JsonResultRepository::new(Arc::clone(&store)));

        let package_service = Arc::new(PackageService::new(Arc::clone(&client)));
        let sop_service = Arc::new(SopService::new(
            Arc::clone(&package_service),
            sop_repository.clone(),
        ));

        let quiz_gen = Arc::new(QuizGenService::new(client));
        let quiz_runner = Arc::new(QuizRunner::new(
            quiz_gen,
            sop_repository,
            Arc::clone(&result_repository),
        ));

        Ok(Self {
            user_service,
            sop_service,
            quiz_runner,
            result_repository,
            config: Arc::new(config),
        })
    }
}
