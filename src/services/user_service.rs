use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::{
    auth::password::{hash_password, verify_password},
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{User, UserRole},
        dto::request::{CreateUserRequestDto, UpdateUserRequestDto},
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Check a username/password pair. Invalid credentials come back as a
    /// plain Unauthorized rejection with no hint which half was wrong.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.repository.find_by_username(username).await?;

        match user {
            Some(user) if verify_password(password, &user.password) => Ok(user),
            _ => Err(AppError::Unauthorized("Invalid login".to_string())),
        }
    }

    pub async fn create_user(&self, request: CreateUserRequestDto) -> AppResult<User> {
        self.repository.create(User::from_request(request)).await
    }

    pub async fn get_user(&self, username: &str) -> AppResult<User> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with username '{}' not found", username))
            })
    }

    pub async fn get_all_users(&self) -> AppResult<Vec<User>> {
        self.repository.find_all().await
    }

    /// Partial update: omitted password keeps the existing digest, omitted
    /// role keeps the existing role.
    pub async fn update_user(
        &self,
        username: &str,
        request: UpdateUserRequestDto,
    ) -> AppResult<User> {
        let mut user = self.get_user(username).await?;

        if let Some(password) = request.password {
            user.password = hash_password(&password);
        }
        if let Some(role) = request.role {
            user.role = role;
        }

        self.repository.update(username, user).await
    }

    /// Delete a user. The currently logged-in user may not delete
    /// themselves.
    pub async fn delete_user(&self, username: &str, acting_username: &str) -> AppResult<()> {
        if username == acting_username {
            return Err(AppError::ValidationError(
                "You cannot delete your own account".to_string(),
            ));
        }

        self.repository.delete(username).await
    }

    /// First-run seeding: when the users document is empty, create an admin
    /// and a score-viewer account so the tool is reachable after deploy.
    pub async fn seed_initial_users(&self, config: &Config) -> AppResult<()> {
        if self.repository.count().await? > 0 {
            return Ok(());
        }

        self.repository
            .create(User::new(
                "admin",
                config.seed_admin_password.expose_secret(),
                UserRole::Admin,
            ))
            .await?;
        self.repository
            .create(User::new(
                "score",
                config.seed_score_viewer_password.expose_secret(),
                UserRole::ScoreViewer,
            ))
            .await?;

        log::info!("seeded initial admin and score viewer accounts");
        Ok(())
    }
}
