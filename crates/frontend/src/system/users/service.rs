//! Мок-сервис пользователей.
//!
//! Эндпоинт сохраняется, но запросы не выполняются: ответы генерируются в памяти
//! после искусственной задержки.

use chrono::{Duration, NaiveDate, Utc};
use contracts::system::users::{NewUser, User, UserId, UserRole, UserStatus};
use gloo_timers::future::TimeoutFuture;
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use super::error::UsersError;
use crate::shared::config::MockServiceOptions;
use crate::shared::validate::validate_email;

const MOCK_NAMES: [&str; 10] = [
    "Иван Петров",
    "Мария Сидорова",
    "Алексей Иванов",
    "Елена Кузнецова",
    "Дмитрий Смирнов",
    "Ольга Попова",
    "Сергей Васильев",
    "Анна Соколова",
    "Николай Михайлов",
    "Татьяна Новикова",
];

const THIRTY_DAYS_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Новый идентификатор пользователя
pub fn generate_id() -> UserId {
    Uuid::new_v4().to_string()
}

/// Симуляция сетевой задержки
async fn simulate_latency(delay_ms: u32) {
    if delay_ms > 0 {
        TimeoutFuture::new(delay_ms).await;
    }
}

/// Тело запроса в том виде, в каком оно ушло бы на эндпоинт
fn request_body<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn random_item<T: Copy>(rng: &mut impl Rng, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

fn check_new_user(name: &str, email: &str) -> Result<(), UsersError> {
    if name.trim().is_empty() {
        return Err(UsersError::EmptyName);
    }
    if !validate_email(email) {
        return Err(UsersError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct MockUsersService {
    endpoint: String,
    options: MockServiceOptions,
}

impl MockUsersService {
    pub fn new(endpoint: impl Into<String>, options: MockServiceOptions) -> Self {
        Self {
            endpoint: endpoint.into(),
            options,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Генерация тестовых данных
    pub fn generate_mock_users(&self, count: usize) -> Vec<User> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        let roles = UserRole::all();
        let statuses = UserStatus::all();

        (1..=count)
            .map(|i| {
                let name = format!("{} {}", random_item(&mut rng, &MOCK_NAMES), i);
                let registration_date = NaiveDate::from_ymd_opt(
                    2020,
                    rng.gen_range(1..=12),
                    rng.gen_range(1..=28),
                )
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
                .unwrap_or(now);
                let last_activity = now - Duration::milliseconds(rng.gen_range(0..THIRTY_DAYS_MS));

                User {
                    id: generate_id(),
                    name,
                    email: format!("user{}@example.com", i),
                    role: random_item(&mut rng, &roles),
                    status: random_item(&mut rng, &statuses),
                    registration_date,
                    last_activity,
                    avatar: None,
                    login_count: rng.gen_range(0..500),
                    posts_count: rng.gen_range(0..100),
                    comments_count: rng.gen_range(0..300),
                }
            })
            .collect()
    }

    pub async fn get_users(&self) -> Result<Vec<User>, UsersError> {
        simulate_latency(self.options.get_delay_ms).await;

        let users = self.generate_mock_users(self.options.users_count);
        log::debug!("{}: generated {} mock users", self.endpoint, users.len());
        Ok(users)
    }

    pub async fn add_new_user(&self, user_data: NewUser) -> Result<User, UsersError> {
        log::debug!("POST {} {}", self.endpoint, request_body(&user_data));
        simulate_latency(self.options.add_delay_ms).await;

        check_new_user(&user_data.name, &user_data.email)?;
        if user_data.send_welcome_email {
            log::debug!("{}: welcome email queued for {}", self.endpoint, user_data.email);
        }

        let now = Utc::now();
        Ok(User {
            id: generate_id(),
            name: user_data.name.trim().to_string(),
            email: user_data.email,
            role: user_data.role,
            status: UserStatus::Active,
            registration_date: now,
            last_activity: now,
            avatar: None,
            login_count: 0,
            posts_count: 0,
            comments_count: 0,
        })
    }

    pub async fn delete_user(&self, user_id: UserId) -> Result<UserId, UsersError> {
        log::debug!("DELETE {}/{}", self.endpoint, user_id);
        simulate_latency(self.options.delete_delay_ms).await;
        Ok(user_id)
    }

    pub async fn delete_users_multiple(&self, user_ids: Vec<UserId>) -> Result<Vec<UserId>, UsersError> {
        log::debug!("DELETE {} {}", self.endpoint, request_body(&user_ids));
        simulate_latency(self.options.delete_many_delay_ms).await;
        Ok(user_ids)
    }

    pub async fn update_user(&self, user_id: UserId, user_data: User) -> Result<User, UsersError> {
        log::debug!("PUT {}/{} {}", self.endpoint, user_id, request_body(&user_data));
        simulate_latency(self.options.update_delay_ms).await;

        check_new_user(&user_data.name, &user_data.email)?;
        Ok(User {
            id: user_id,
            ..user_data
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MockUsersService {
        MockUsersService::new("/api/users", MockServiceOptions::default().without_latency())
    }

    #[test]
    fn test_generated_users_shape() {
        let users = service().generate_mock_users(20);
        assert_eq!(users.len(), 20);

        for (i, user) in users.iter().enumerate() {
            let ordinal = i + 1;
            assert_eq!(user.email, format!("user{}@example.com", ordinal));
            assert!(user.name.ends_with(&format!(" {}", ordinal)));
            assert_eq!(user.registration_date.format("%Y").to_string(), "2020");
            assert!(user.last_activity <= Utc::now());
            assert!(user.login_count < 500);
            assert!(user.posts_count < 100);
            assert!(user.comments_count < 300);
            assert!(user.avatar.is_none());
        }

        let mut ids: Vec<_> = users.iter().map(|u| u.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn test_get_users_uses_configured_count() {
        let options = MockServiceOptions {
            users_count: 5,
            ..MockServiceOptions::default().without_latency()
        };
        let users = MockUsersService::new("/api/users", options).get_users().await.unwrap();
        assert_eq!(users.len(), 5);
    }

    #[tokio::test]
    async fn test_add_new_user_fills_defaults() {
        let user = service()
            .add_new_user(NewUser {
                name: "Новый Пользователь".to_string(),
                email: "new@example.com".to_string(),
                role: UserRole::Moderator,
                send_welcome_email: true,
            })
            .await
            .unwrap();

        assert!(!user.id.is_empty());
        assert_eq!(user.role, UserRole::Moderator);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.login_count, 0);
        assert_eq!(user.registration_date, user.last_activity);
    }

    #[tokio::test]
    async fn test_add_new_user_validates_input() {
        let err = service()
            .add_new_user(NewUser {
                name: "Имя".to_string(),
                email: "not-an-email".to_string(),
                ..NewUser::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, UsersError::InvalidEmail("not-an-email".to_string()));

        let err = service().add_new_user(NewUser::default()).await.unwrap_err();
        assert_eq!(err, UsersError::EmptyName);
    }

    #[tokio::test]
    async fn test_delete_and_update_echo_input() {
        let service = service();
        assert_eq!(service.delete_user("a".to_string()).await.unwrap(), "a");
        assert_eq!(
            service
                .delete_users_multiple(vec!["a".to_string(), "b".to_string()])
                .await
                .unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );

        let user = service.generate_mock_users(1).remove(0);
        let updated = service.update_user("fixed-id".to_string(), user.clone()).await.unwrap();
        assert_eq!(updated.id, "fixed-id");
        assert_eq!(updated.email, user.email);
    }
}
