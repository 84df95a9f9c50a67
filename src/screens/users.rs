//! User catalog screen

use std::time::Duration;

use super::{check_form, reject, Collection};
use crate::{
    client::PortariaApi,
    error::ConsoleResult,
    models::{User, UserForm, UserRole},
    notice::NoticeBoard,
};

pub struct UsersScreen<A> {
    api: A,
    users: Collection<User>,
    notices: NoticeBoard,
}

impl<A: PortariaApi> UsersScreen<A> {
    pub fn new(api: A, notice_ttl: Duration) -> Self {
        Self {
            api,
            users: Collection::default(),
            notices: NoticeBoard::new(notice_ttl),
        }
    }

    pub fn users(&self) -> &[User] {
        self.users.as_slice()
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn count_by_role(&self, role: UserRole) -> usize {
        self.users.iter().filter(|u| u.role == role).count()
    }

    pub async fn load(&mut self) -> ConsoleResult<()> {
        match self.api.list_users().await {
            Ok(users) => {
                self.users.replace_all(users);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading users: {}", e);
                self.users.replace_all(Vec::new());
                self.notices.error("Error loading users");
                Err(e)
            }
        }
    }

    pub async fn save(&mut self, editing: Option<&str>, form: &UserForm) -> ConsoleResult<User> {
        self.notices.clear();
        let form = form.normalized();
        check_form(&form, &mut self.notices)?;

        let result = match editing {
            Some(id) => self.api.update_user(id, &form).await,
            None => self.api.create_user(&form).await,
        };

        match (result, editing) {
            (Ok(user), Some(id)) => {
                self.users.replace(id, user.clone());
                self.notices.success("User updated");
                Ok(user)
            }
            (Ok(user), None) => {
                self.users.append(user.clone());
                self.notices.success("User created");
                Ok(user)
            }
            (Err(e), _) => {
                tracing::error!("Error saving user: {}", e);
                self.notices.error("Error saving user");
                Err(e)
            }
        }
    }

    /// Same optimistic protocol as the item catalog: remove locally, call,
    /// refetch everything if the call fails.
    pub async fn delete(&mut self, id: &str, confirmed: bool) -> ConsoleResult<()> {
        if !confirmed {
            return reject(&mut self.notices, "Deletion must be confirmed");
        }
        self.notices.clear();

        self.users.remove(id);

        if let Err(e) = self.api.delete_user(id).await {
            tracing::error!("Error deleting user {}: {}", id, e);
            match self.api.list_users().await {
                Ok(users) => self.users.replace_all(users),
                Err(refetch) => tracing::error!("Refetch after failed delete failed: {}", refetch),
            }
            self.notices.error("Error deleting user");
            return Err(e);
        }

        self.notices.success("User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockPortariaApi;
    use crate::error::ConsoleError;
    use crate::screens::fixtures::user;

    fn initial() -> Vec<User> {
        let mut professor = user("u2", "Bruno", "1999000001");
        professor.role = UserRole::Professor;
        vec![user("u1", "Ana", "2023010187"), professor]
    }

    fn form(name: &str, email: &str) -> UserForm {
        UserForm {
            name: name.to_string(),
            role: UserRole::Doorkeeper,
            badge: "555".to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_failed_delete_refetches() {
        let mut api = MockPortariaApi::new();
        api.expect_list_users().times(2).returning(|| Ok(initial()));
        api.expect_delete_user().times(1).returning(|_| {
            Err(ConsoleError::Api {
                status: 409,
                status_text: "Conflict".to_string(),
            })
        });

        let mut screen = UsersScreen::new(api, Duration::from_secs(5));
        screen.load().await.unwrap();

        assert!(screen.delete("u2", true).await.is_err());
        assert_eq!(screen.users(), initial().as_slice());
    }

    #[tokio::test]
    async fn test_create_and_counts() {
        let mut api = MockPortariaApi::new();
        api.expect_list_users().times(1).returning(|| Ok(initial()));
        api.expect_create_user().times(1).returning(|f| {
            Ok(User {
                id: "u3".to_string(),
                name: f.name.clone(),
                role: f.role,
                badge: f.badge.clone(),
                email: f.email.clone(),
            })
        });

        let mut screen = UsersScreen::new(api, Duration::from_secs(5));
        screen.load().await.unwrap();
        screen.save(None, &form("Carla", "carla@example.org")).await.unwrap();

        assert_eq!(screen.users().iter().filter(|u| u.id == "u3").count(), 1);
        assert_eq!(screen.count_by_role(UserRole::Student), 1);
        assert_eq!(screen.count_by_role(UserRole::Professor), 1);
        assert_eq!(screen.count_by_role(UserRole::Doorkeeper), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_by_id() {
        let mut api = MockPortariaApi::new();
        api.expect_list_users().times(1).returning(|| Ok(initial()));
        api.expect_update_user()
            .withf(|id, f| id == "u1" && f.name == "Ana Maria")
            .times(1)
            .returning(|_, _| Ok(user("u1", "Ana Maria", "2023010187")));

        let mut screen = UsersScreen::new(api, Duration::from_secs(5));
        screen.load().await.unwrap();
        screen.save(Some("u1"), &form("Ana Maria", "ana@example.org")).await.unwrap();

        assert_eq!(screen.users()[0].name, "Ana Maria");
        assert_eq!(screen.users()[1], initial()[1]);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_locally() {
        let mut api = MockPortariaApi::new();
        api.expect_create_user().never();

        let mut screen = UsersScreen::new(api, Duration::from_secs(5));
        let err = screen.save(None, &form("Carla", "carla")).await.unwrap_err();

        assert!(matches!(err, ConsoleError::Validation(msg) if msg == "Invalid email format"));
    }

    #[tokio::test]
    async fn test_load_failure_shows_error() {
        let mut api = MockPortariaApi::new();
        api.expect_list_users().times(1).returning(|| {
            Err(ConsoleError::Api {
                status: 502,
                status_text: "Bad Gateway".to_string(),
            })
        });

        let mut screen = UsersScreen::new(api, Duration::from_secs(5));
        assert!(screen.load().await.is_err());
        assert!(screen.users().is_empty());
        assert_eq!(screen.notices().error_text(), Some("Error loading users"));
    }
}
