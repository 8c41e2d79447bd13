use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ephemeral quiz. It lives only inside the quiz runner for the duration
/// of one attempt and is never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    #[serde(default = "new_question_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuizQuestionType,
    pub question: String,
    /// Present iff the question is multiple-choice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    pub answer: String,
    /// Short label of the concept tested; feeds weak-area tracking.
    pub topic: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum QuizQuestionType {
    #[serde(rename = "mcq")]
    MultipleChoice,
    #[serde(rename = "tf")]
    TrueFalse,
    #[serde(rename = "short")]
    ShortAnswer,
    #[serde(rename = "scenario")]
    Scenario,
}

fn new_question_id() -> String {
    Uuid::new_v4().to_string()
}

impl Quiz {
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}
