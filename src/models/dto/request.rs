use serde::Deserialize;
use validator::Validate;

use crate::models::domain::UserRole;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequestDto {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,

    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequestDto {
    /// When omitted, the existing digest is kept.
    #[validate(length(min = 8, max = 100))]
    pub password: Option<String>,

    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadSopRequestDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Plain text already extracted from the uploaded document. PDF text
    /// extraction happens outside this service.
    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct StartQuizRequestDto {
    /// Question count offered to trainees, 7 when the body omits it, same
    /// bounds and default as the original slider. The generator itself
    /// accepts any positive count.
    #[validate(range(min = 5, max = 12))]
    pub num_questions: u32,
}

impl Default for StartQuizRequestDto {
    fn default() -> Self {
        StartQuizRequestDto { num_questions: 7 }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizRequestDto {
    /// One answer string per question, in question order.
    pub answers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_quiz_request_bounds() {
        let ok = StartQuizRequestDto { num_questions: 7 };
        assert!(ok.validate().is_ok());

        let too_few = StartQuizRequestDto { num_questions: 4 };
        assert!(too_few.validate().is_err());

        let too_many = StartQuizRequestDto { num_questions: 13 };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn start_quiz_request_defaults_to_seven_questions() {
        let request: StartQuizRequestDto = serde_json::from_str("{}").unwrap();
        assert_eq!(request.num_questions, 7);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn create_user_request_rejects_short_password() {
        let request = CreateUserRequestDto {
            username: "trainee".to_string(),
            password: "short".to_string(),
            role: UserRole::User,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn upload_sop_request_rejects_empty_text() {
        let request = UploadSopRequestDto {
            title: "Lockout".to_string(),
            text: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
