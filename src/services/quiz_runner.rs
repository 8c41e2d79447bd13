use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Quiz,
    repositories::{ResultRepository, SopRepository},
    services::{quiz_gen_service::QuizGenService, weak_areas},
};

/// One trainee's in-flight quiz. Exists only between start and submission;
/// an abandoned quiz is overwritten by the next start and leaves no
/// persisted trace.
#[derive(Clone, Debug)]
pub struct ActiveQuiz {
    pub sop_title: String,
    pub quiz: Quiz,
}

#[derive(Clone, Debug)]
pub struct SubmissionOutcome {
    pub score: u32,
    pub total: u32,
    pub weak_areas: BTreeMap<String, u32>,
    pub all_mastered: bool,
}

/// Per-trainee quiz state machine: NoQuiz -> QuizInProgress -> (submit) ->
/// NoQuiz. One active quiz per user; state lives here, keyed by username,
/// never in a hidden global.
pub struct QuizRunner {
    quiz_gen: Arc<QuizGenService>,
    sop_repository: Arc<dyn SopRepository>,
    result_repository: Arc<dyn ResultRepository>,
    active: RwLock<HashMap<String, ActiveQuiz>>,
}

impl QuizRunner {
    pub fn new(
        quiz_gen: Arc<QuizGenService>,
        sop_repository: Arc<dyn SopRepository>,
        result_repository: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            quiz_gen,
            sop_repository,
            result_repository,
            active: RwLock::new(HashMap::new()),
        }
    }

    /// Start a quiz for the chosen SOP. Blocks on the generation call; on
    /// success the quiz becomes the user's active quiz (replacing any
    /// abandoned one) and a copy is returned for rendering. `Ok(None)`
    /// means generation failed and the user stays in NoQuiz.
    pub async fn start(
        &self,
        username: &str,
        sop_title: &str,
        num_questions: u32,
    ) -> AppResult<Option<Quiz>> {
        let sop = self
            .sop_repository
            .find_by_title(sop_title)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("SOP with title '{}' not found", sop_title)))?;

        let profile = self
            .result_repository
            .get_or_create(username, sop_title)
            .await?;
        let weak_topics = profile.weak_topics();

        let Some(quiz) = self
            .quiz_gen
            .generate(&sop.content, &weak_topics, num_questions)
            .await?
        else {
            return Ok(None);
        };

        log::info!(
            "started {}-question quiz on '{}' for {} ({} weak topics)",
            quiz.total_questions(),
            sop_title,
            username,
            weak_topics.len()
        );

        let mut active = self.active.write().await;
        active.insert(
            username.to_string(),
            ActiveQuiz {
                sop_title: sop_title.to_string(),
                quiz: quiz.clone(),
            },
        );

        Ok(Some(quiz))
    }

    /// Submit answers for the active quiz, in question order. Grades with
    /// lenient matching, feeds missed topics into the weak-area tracker,
    /// appends one history entry, persists the profile and discards the
    /// quiz.
    pub async fn submit(&self, username: &str, answers: &[String]) -> AppResult<SubmissionOutcome> {
        let ActiveQuiz { sop_title, quiz } = {
            let mut active = self.active.write().await;
            active.remove(username).ok_or_else(|| {
                AppError::NotFound(format!("No active quiz for user '{}'", username))
            })?
        };

        let total = quiz.total_questions() as u32;
        let (score, wrong_topics) = weak_areas::grade(&quiz, answers);

        let mut profile = self
            .result_repository
            .get_or_create(username, &sop_title)
            .await?;

        weak_areas::record_missed_topics(&mut profile.weak_areas, &wrong_topics);
        profile.record_attempt(score, total);

        self.result_repository
            .save(username, &sop_title, profile.clone())
            .await?;

        log::info!(
            "{} scored {}/{} on '{}'; {} weak topics remain",
            username,
            score,
            total,
            sop_title,
            profile.weak_areas.len()
        );

        Ok(SubmissionOutcome {
            score,
            total,
            all_mastered: profile.weak_areas.is_empty(),
            weak_areas: profile.weak_areas,
        })
    }

    /// The user's active quiz, if any. Used to re-render an in-progress
    /// attempt.
    pub async fn active_quiz(&self, username: &str) -> Option<ActiveQuiz> {
        self.active.read().await.get(username).cloned()
    }
}
