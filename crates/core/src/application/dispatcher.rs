// Command Bus
//
// Routes each command variant to exactly one service handler. The match is
// exhaustive: adding a Command variant will not compile until a handler arm
// exists here, and two handlers for one variant cannot be expressed.

use tracing::info;

use crate::domain::{Command, User};
use crate::error::Result;
use crate::application::service::UserService;

/// Result of dispatching a command
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    /// A user was created or materialized
    User(User),
    /// A lookup that may legitimately find nothing
    MaybeUser(Option<User>),
}

pub struct CommandBus {
    service: UserService,
}

impl CommandBus {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }

    /// Execute a command, routing it to its handler.
    ///
    /// `request_id` is carried for log correlation only.
    pub async fn dispatch(&self, command: Command, request_id: &str) -> Result<CommandOutcome> {
        info!(request_id = %request_id, command = command.kind(), "Executing command");

        match command {
            Command::CreateUser(cmd) => self
                .service
                .handle_create_user(cmd)
                .await
                .map(CommandOutcome::User),
            Command::GetUser(cmd) => self
                .service
                .handle_get_user(cmd)
                .await
                .map(CommandOutcome::MaybeUser),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateUser, GetUser};
    use crate::port::MockUserRepository;
    use mockall::predicate::eq;
    use std::sync::Arc;

    fn bus_with(repo: MockUserRepository) -> CommandBus {
        CommandBus::new(UserService::new(Arc::new(repo)))
    }

    #[tokio::test]
    async fn test_create_user_routes_to_create_handler() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|u, e| u == "carol" && e == "carol@example.com")
            .times(1)
            .returning(|u, e| Ok(User::new(7, u, e)));

        let bus = bus_with(repo);
        let outcome = bus
            .dispatch(
                Command::CreateUser(CreateUser {
                    username: "carol".to_string(),
                    email: "carol@example.com".to_string(),
                }),
                "req-1",
            )
            .await
            .unwrap();

        match outcome {
            CommandOutcome::User(user) => assert_eq!(user.id, 7),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_user_routes_to_lookup_handler() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(7))
            .times(1)
            .returning(|id| Ok(Some(User::new(id, "carol", "carol@example.com"))));

        let bus = bus_with(repo);
        let outcome = bus
            .dispatch(Command::GetUser(GetUser { user_id: 7 }), "req-2")
            .await
            .unwrap();

        match outcome {
            CommandOutcome::MaybeUser(Some(user)) => assert_eq!(user.username, "carol"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
