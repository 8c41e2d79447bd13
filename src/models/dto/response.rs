use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::domain::{Quiz, QuizQuestionType, Sop, User, UserRole};

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub username: String,
    pub role: UserRole,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            username: user.username,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Listing row for the SOP index: title plus summary, no raw content.
#[derive(Debug, Clone, Serialize)]
pub struct SopSummaryDto {
    pub title: String,
    pub summary: String,
}

/// Full training-package view of a stored SOP. The raw extracted text stays
/// server-side.
#[derive(Debug, Clone, Serialize)]
pub struct SopDto {
    pub title: String,
    pub summary: String,
    pub steps: Vec<String>,
    pub warnings: Vec<String>,
    pub checklist: Vec<String>,
}

impl SopDto {
    pub fn from_sop(title: &str, sop: Sop) -> Self {
        SopDto {
            title: title.to_string(),
            summary: sop.summary,
            steps: sop.steps,
            warnings: sop.warnings,
            checklist: sop.checklist,
        }
    }
}

/// A quiz as shown to the trainee: expected answers and topic labels are
/// withheld until submission.
#[derive(Debug, Clone, Serialize)]
pub struct QuizDto {
    pub sop_title: String,
    pub questions: Vec<QuizQuestionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestionDto {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuizQuestionType,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl QuizDto {
    pub fn from_quiz(sop_title: &str, quiz: &Quiz) -> Self {
        QuizDto {
            sop_title: sop_title.to_string(),
            questions: quiz
                .questions
                .iter()
                .map(|q| QuizQuestionDto {
                    id: q.id.clone(),
                    question_type: q.question_type,
                    question: q.question.clone(),
                    choices: q.choices.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResultDto {
    pub score: u32,
    pub total: u32,
    /// Topics still weak after this submission, with miss counts.
    pub weak_areas: BTreeMap<String, u32>,
    /// True when no weak areas remain for this SOP.
    pub all_mastered: bool,
}
