use serde::{Deserialize, Serialize};

use crate::auth::password::hash_password;
use crate::models::dto::request::CreateUserRequestDto;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    ScoreViewer,
    User,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub username: String,
    /// sha-256 hex digest of the password, never the plaintext.
    pub password: String,
    pub role: UserRole,
}

/// The value half of the users document; the username is the document key.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserRecord {
    pub password: String,
    pub role: UserRole,
}

impl User {
    pub fn new(username: &str, plaintext_password: &str, role: UserRole) -> Self {
        User {
            username: username.to_string(),
            password: hash_password(plaintext_password),
            role,
        }
    }

    pub fn from_request(request: CreateUserRequestDto) -> Self {
        User::new(&request.username, &request.password, request.role)
    }

    pub fn from_record(username: &str, record: UserRecord) -> Self {
        User {
            username: username.to_string(),
            password: record.password,
            role: record.role,
        }
    }

    pub fn into_record(self) -> UserRecord {
        UserRecord {
            password: self.password,
            role: self.role,
        }
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(username: &str, role: UserRole) -> Self {
        User::new(username, "test-password", role)
    }
}
