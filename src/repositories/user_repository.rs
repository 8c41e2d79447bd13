use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{User, UserRecord},
    store::{DocumentStore, USERS_DOCUMENT},
};

type UsersDocument = BTreeMap<String, UserRecord>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn update(&self, username: &str, user: User) -> AppResult<User>;
    async fn delete(&self, username: &str) -> AppResult<()>;
    async fn count(&self) -> AppResult<usize>;
}

pub struct JsonUserRepository {
    store: Arc<DocumentStore>,
}

impl JsonUserRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> AppResult<UsersDocument> {
        self.store.load(USERS_DOCUMENT)
    }

    fn save(&self, document: &UsersDocument) -> AppResult<()> {
        self.store.save(USERS_DOCUMENT, document)
    }
}

#[async_trait]
impl UserRepository for JsonUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut document = self.load()?;

        if document.contains_key(&user.username) {
            return Err(AppError::AlreadyExists(format!(
                "User with username '{}' already exists",
                user.username
            )));
        }

        document.insert(user.username.clone(), user.clone().into_record());
        self.save(&document)?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let document = self.load()?;
        Ok(document
            .get(username)
            .map(|record| User::from_record(username, record.clone())))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let document = self.load()?;
        Ok(document
            .into_iter()
            .map(|(username, record)| User::from_record(&username, record))
            .collect())
    }

    async fn update(&self, username: &str, user: User) -> AppResult<User> {
        let mut document = self.load()?;

        if !document.contains_key(username) {
            return Err(AppError::NotFound(format!(
                "User with username '{}' not found",
                username
            )));
        }

        document.insert(username.to_string(), user.clone().into_record());
        self.save(&document)?;
        Ok(user)
    }

    async fn delete(&self, username: &str) -> AppResult<()> {
        let mut document = self.load()?;

        if document.remove(username).is_none() {
            return Err(AppError::NotFound(format!(
                "User with username '{}' not found",
                username
            )));
        }

        self.save(&document)?;
        Ok(())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.load()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::UserRole;

    fn temp_repository() -> (tempfile::TempDir, JsonUserRepository) {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let store = Arc::new(DocumentStore::open(dir.path()).unwrap());
        (dir, JsonUserRepository::new(store))
    }

    #[tokio::test]
    async fn create_and_find_round_trip() {
        let (_dir, repo) = temp_repository();

        let user = User::test_user("trainee", UserRole::User);
        repo.create(user.clone()).await.unwrap();

        let found = repo.find_by_username("trainee").await.unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn create_duplicate_username_is_rejected() {
        let (_dir, repo) = temp_repository();

        repo.create(User::test_user("trainee", UserRole::User))
            .await
            .unwrap();
        let result = repo.create(User::test_user("trainee", UserRole::Admin)).await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let (_dir, repo) = temp_repository();

        let result = repo.delete("ghost").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_replaces_record() {
        let (_dir, repo) = temp_repository();

        repo.create(User::test_user("trainee", UserRole::User))
            .await
            .unwrap();
        let promoted = User::new("trainee", "newpassword", UserRole::Admin);
        repo.update("trainee", promoted.clone()).await.unwrap();

        let found = repo.find_by_username("trainee").await.unwrap().unwrap();
        assert_eq!(found.role, UserRole::Admin);
        assert_eq!(found.password, promoted.password);
    }
}
