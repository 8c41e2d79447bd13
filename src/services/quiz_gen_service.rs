use std::sync::Arc;

use serde::Deserialize;

use crate::{
    constants::prompts::{QUIZ_GENERATOR_PROMPT, WEAK_AREA_FOCUS_RULE},
    errors::AppResult,
    models::domain::{Quiz, QuizQuestion, QuizQuestionType},
    services::completion_client::{extract_json_payload, CompletionClient},
};

/// Generates an adaptive quiz from SOP text, biased toward the trainee's
/// weak topics.
pub struct QuizGenService {
    client: Arc<dyn CompletionClient>,
}

#[derive(Debug, Deserialize)]
struct QuizPayload {
    questions: Vec<QuizQuestion>,
}

impl QuizGenService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Request a quiz of `num_questions` questions. When `weak_topics` is
    /// non-empty the prompt demands that at least 60% of questions focus on
    /// them; an empty set simply drops that rule. Any positive count is
    /// accepted here; the HTTP layer bounds trainee requests to 5-12.
    ///
    /// Returns `None` ("no quiz available") when the service fails or the
    /// response does not parse into a structurally valid quiz. Never
    /// propagates generation failure as an error.
    pub async fn generate(
        &self,
        sop_text: &str,
        weak_topics: &[String],
        num_questions: u32,
    ) -> AppResult<Option<Quiz>> {
        if num_questions == 0 {
            log::warn!("refusing to generate a zero-question quiz");
            return Ok(None);
        }

        let prompt = self.build_prompt(sop_text, weak_topics, num_questions);

        let response = match self.client.complete(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("quiz generation failed: {}", e);
                return Ok(None);
            }
        };

        let Some(payload) = extract_json_payload(&response) else {
            log::warn!("quiz response contained no JSON");
            return Ok(None);
        };

        let parsed = match serde_json::from_str::<QuizPayload>(payload) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("quiz response did not match schema: {}", e);
                return Ok(None);
            }
        };

        let quiz = Quiz {
            questions: parsed.questions,
        };

        if let Err(reason) = validate_quiz(&quiz) {
            log::warn!("generated quiz failed validation: {}", reason);
            return Ok(None);
        }

        Ok(Some(quiz))
    }

    fn build_prompt(&self, sop_text: &str, weak_topics: &[String], num_questions: u32) -> String {
        let mut prompt = format!(
            "Generate {} SOP training questions.\n\n{}",
            num_questions, QUIZ_GENERATOR_PROMPT
        );

        if !weak_topics.is_empty() {
            prompt.push_str(&format!(
                "\n\nWEAK AREAS TO FOCUS ON:\n{}\n{}",
                weak_topics.join(", "),
                WEAK_AREA_FOCUS_RULE
            ));
        }

        prompt.push_str(&format!("\n\nSOP:\n{}", sop_text));
        prompt
    }
}

/// Fail-closed structural validation of a generated quiz: every question
/// carries a non-empty prompt, answer and topic, and choices are present
/// iff the question is multiple-choice.
fn validate_quiz(quiz: &Quiz) -> Result<(), String> {
    if quiz.questions.is_empty() {
        return Err("quiz has no questions".to_string());
    }

    for (i, q) in quiz.questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            return Err(format!("question {} has empty prompt text", i));
        }
        if q.answer.trim().is_empty() {
            return Err(format!("question {} has no expected answer", i));
        }
        if q.topic.trim().is_empty() {
            return Err(format!("question {} has no topic label", i));
        }
        match (q.question_type, &q.choices) {
            (QuizQuestionType::MultipleChoice, None) => {
                return Err(format!("mcq question {} has no choices", i));
            }
            (QuizQuestionType::MultipleChoice, Some(choices)) if choices.is_empty() => {
                return Err(format!("mcq question {} has an empty choice list", i));
            }
            (QuizQuestionType::MultipleChoice, Some(_)) => {}
            (_, Some(_)) => {
                return Err(format!("non-mcq question {} carries choices", i));
            }
            (_, None) => {}
        }
    }

    Ok(())
}
