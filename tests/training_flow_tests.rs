use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use sop_training_server::{
    errors::{AppError, AppResult},
    models::domain::{ResultProfile, Sop, TrainingPackage},
    repositories::{JsonResultRepository, JsonSopRepository, ResultRepository, SopRepository},
    services::{CompletionClient, QuizGenService, QuizRunner},
    store::DocumentStore,
};

/// Completion client fed a script of canned responses; records every prompt
/// it receives so tests can assert on prompt content.
struct ScriptedCompletionClient {
    responses: Mutex<VecDeque<AppResult<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletionClient {
    fn new(responses: Vec<AppResult<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::UpstreamError("no scripted response".into())))
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    client: Arc<ScriptedCompletionClient>,
    runner: QuizRunner,
    results: Arc<dyn ResultRepository>,
}

async fn harness(responses: Vec<AppResult<String>>) -> Harness {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = Arc::new(DocumentStore::open(dir.path()).expect("store should open"));

    let sop_repository = Arc::new(JsonSopRepository::new(Arc::clone(&store)));
    sop_repository
        .upsert(
            "Lockout",
            Sop::from_package(
                "Full lockout-tagout procedure text.",
                TrainingPackage {
                    summary: "Lockout in brief".to_string(),
                    steps: vec!["Isolate energy".to_string()],
                    warnings: vec!["Never bypass a lock".to_string()],
                    checklist: vec!["Lock applied".to_string()],
                },
            ),
        )
        .await
        .expect("seed sop");

    let results: Arc<dyn ResultRepository> =
        Arc::new(JsonResultRepository::new(Arc::clone(&store)));

    let client = Arc::new(ScriptedCompletionClient::new(responses));
    let quiz_gen = Arc::new(QuizGenService::new(
        Arc::clone(&client) as Arc<dyn CompletionClient>
    ));
    let runner = QuizRunner::new(quiz_gen, sop_repository, Arc::clone(&results));

    Harness {
        _dir: dir,
        client,
        runner,
        results,
    }
}

const FIVE_QUESTION_QUIZ: &str = r#"{
    "questions": [
        {"type":"short","question":"How do you start?","answer":"isolate energy","topic":"procedure"},
        {"type":"tf","question":"Locks may be shared.","answer":"False","topic":"procedure"},
        {"type":"mcq","question":"Required hand protection?","choices":["A) gloves","B) none","C) rings","D) tape"],"answer":"A) gloves","topic":"equipment"},
        {"type":"short","question":"What must you wear?","answer":"full ppe kit","topic":"ppe"},
        {"type":"scenario","question":"A breaker is left on. What now?","answer":"apply lockout","topic":"lockout"}
    ]
}"#;

const ONE_PPE_QUESTION_QUIZ: &str = r#"{
    "questions": [
        {"type":"short","question":"Which gloves?","answer":"insulated gloves","topic":"ppe"}
    ]
}"#;

#[tokio::test]
async fn first_quiz_submission_records_weak_areas_and_history() {
    let h = harness(vec![Ok(FIVE_QUESTION_QUIZ.to_string())]).await;

    // Profile starts empty
    let before = h.results.get_or_create("trainee", "Lockout").await.unwrap();
    assert!(before.weak_areas.is_empty());
    assert!(before.history.is_empty());

    let quiz = h
        .runner
        .start("trainee", "Lockout", 5)
        .await
        .unwrap()
        .expect("quiz should be generated");
    assert_eq!(quiz.total_questions(), 5);

    // 3 correct, 2 wrong (topics ppe and lockout)
    let answers = vec![
        "Isolate energy first".to_string(),
        "false".to_string(),
        "A) gloves".to_string(),
        "just a hard hat".to_string(),
        "carry on working".to_string(),
    ];
    let outcome = h.runner.submit("trainee", &answers).await.unwrap();

    assert_eq!(outcome.score, 3);
    assert_eq!(outcome.total, 5);
    assert!(!outcome.all_mastered);
    assert_eq!(outcome.weak_areas.get("ppe"), Some(&1));
    assert_eq!(outcome.weak_areas.get("lockout"), Some(&1));
    assert_eq!(outcome.weak_areas.len(), 2);

    let profile = h.results.find("trainee", "Lockout").await.unwrap().unwrap();
    assert_eq!(profile.weak_areas.get("ppe"), Some(&1));
    assert_eq!(profile.weak_areas.get("lockout"), Some(&1));
    assert_eq!(profile.history.len(), 1);
    assert_eq!(profile.history[0].score, 3);
    assert_eq!(profile.history[0].total, 5);
}

#[tokio::test]
async fn repeat_miss_increments_existing_counter_only() {
    let h = harness(vec![Ok(ONE_PPE_QUESTION_QUIZ.to_string())]).await;

    let mut profile = ResultProfile::default();
    profile.weak_areas.insert("ppe".to_string(), 2);
    h.results
        .save("trainee", "Lockout", profile)
        .await
        .unwrap();

    h.runner
        .start("trainee", "Lockout", 5)
        .await
        .unwrap()
        .expect("quiz should be generated");

    let outcome = h
        .runner
        .submit("trainee", &["bare hands".to_string()])
        .await
        .unwrap();

    assert_eq!(outcome.weak_areas.get("ppe"), Some(&3));
    assert_eq!(outcome.weak_areas.len(), 1);

    let profile = h.results.find("trainee", "Lockout").await.unwrap().unwrap();
    assert_eq!(profile.weak_areas.get("ppe"), Some(&3));
}

#[tokio::test]
async fn perfect_submission_leaves_weak_areas_untouched() {
    let h = harness(vec![Ok(ONE_PPE_QUESTION_QUIZ.to_string())]).await;

    h.runner
        .start("trainee", "Lockout", 5)
        .await
        .unwrap()
        .expect("quiz should be generated");

    let outcome = h
        .runner
        .submit("trainee", &["insulated gloves".to_string()])
        .await
        .unwrap();

    assert_eq!(outcome.score, 1);
    assert!(outcome.weak_areas.is_empty());
    assert!(outcome.all_mastered);

    let profile = h.results.find("trainee", "Lockout").await.unwrap().unwrap();
    assert!(profile.weak_areas.is_empty());
    assert_eq!(profile.history.len(), 1);
}

#[tokio::test]
async fn weak_topics_feed_the_next_generation_prompt() {
    let h = harness(vec![Ok(ONE_PPE_QUESTION_QUIZ.to_string())]).await;

    let mut profile = ResultProfile::default();
    profile.weak_areas.insert("ppe".to_string(), 1);
    profile.weak_areas.insert("lockout".to_string(), 2);
    h.results
        .save("trainee", "Lockout", profile)
        .await
        .unwrap();

    h.runner.start("trainee", "Lockout", 7).await.unwrap();

    let prompts = h.client.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("WEAK AREAS TO FOCUS ON"));
    assert!(prompts[0].contains("ppe"));
    assert!(prompts[0].contains("lockout"));
    assert!(prompts[0].contains("At least 60%"));
    // The SOP's raw content, not its summary, is the generation source
    assert!(prompts[0].contains("Full lockout-tagout procedure text."));
}

#[tokio::test]
async fn generation_failure_leaves_user_in_no_quiz_state() {
    let h = harness(vec![Err(AppError::UpstreamError("service down".into()))]).await;

    let started = h.runner.start("trainee", "Lockout", 5).await.unwrap();
    assert!(started.is_none());

    // No active quiz and nothing persisted beyond the lazily-created profile
    let submit = h.runner.submit("trainee", &[]).await;
    assert!(matches!(submit, Err(AppError::NotFound(_))));

    let profile = h.results.find("trainee", "Lockout").await.unwrap().unwrap();
    assert!(profile.history.is_empty());
}

#[tokio::test]
async fn starting_a_new_quiz_discards_the_abandoned_one() {
    let h = harness(vec![
        Ok(FIVE_QUESTION_QUIZ.to_string()),
        Ok(ONE_PPE_QUESTION_QUIZ.to_string()),
    ])
    .await;

    h.runner.start("trainee", "Lockout", 5).await.unwrap();
    // Trainee walks away and later starts over
    h.runner.start("trainee", "Lockout", 5).await.unwrap();

    let active = h.runner.active_quiz("trainee").await.unwrap();
    assert_eq!(active.quiz.total_questions(), 1);

    // Submission grades against the replacement quiz
    let outcome = h
        .runner
        .submit("trainee", &["insulated gloves".to_string()])
        .await
        .unwrap();
    assert_eq!(outcome.total, 1);

    // The abandoned attempt left no history
    let profile = h.results.find("trainee", "Lockout").await.unwrap().unwrap();
    assert_eq!(profile.history.len(), 1);
}

#[tokio::test]
async fn submit_without_active_quiz_is_rejected() {
    let h = harness(vec![]).await;

    let result = h.runner.submit("trainee", &["anything".to_string()]).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn start_on_unknown_sop_is_not_found() {
    let h = harness(vec![]).await;

    let result = h.runner.start("trainee", "Ghost SOP", 5).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn malformed_generation_output_yields_no_quiz() {
    let h = harness(vec![Ok("Sorry, I cannot help with that.".to_string())]).await;

    let started = h.runner.start("trainee", "Lockout", 5).await.unwrap();
    assert!(started.is_none());
}
