// User Service - application-level use cases
//
// Knows nothing about the wire protocol; the command bus invokes its
// handlers. Depends on the repository port only.

use std::sync::Arc;

use tracing::info;

use crate::domain::user::validate_new_user;
use crate::domain::{CreateUser, GetUser, User};
use crate::error::Result;
use crate::port::UserRepository;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Handle a CreateUser command
    pub async fn handle_create_user(&self, cmd: CreateUser) -> Result<User> {
        validate_new_user(&cmd.username, &cmd.email)?;

        let user = self.user_repo.create(&cmd.username, &cmd.email).await?;
        info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Handle a GetUser command. Absence is `Ok(None)`.
    pub async fn handle_get_user(&self, cmd: GetUser) -> Result<Option<User>> {
        self.user_repo.find_by_id(cmd.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::port::MockUserRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_create_user_delegates_to_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|username, email| username == "alice" && email == "alice@example.com")
            .times(1)
            .returning(|username, email| Ok(User::new(1, username, email)));

        let service = UserService::new(Arc::new(repo));
        let user = service
            .handle_create_user(CreateUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_create_user_rejects_invalid_input_before_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().times(0);

        let service = UserService::new(Arc::new(repo));
        let err = service
            .handle_create_user(CreateUser {
                username: String::new(),
                email: "a@example.com".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Domain(_)));
    }

    #[tokio::test]
    async fn test_get_user_absent_is_none() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repo));
        let found = service
            .handle_get_user(GetUser { user_id: 42 })
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_unavailable_surfaces_unchanged() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().times(1).returning(|_, _| {
            Err(AppError::Unavailable(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset",
            ))))
        });

        let service = UserService::new(Arc::new(repo));
        let err = service
            .handle_create_user(CreateUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }
}
