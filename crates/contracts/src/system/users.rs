use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Идентификатор пользователя (непрозрачная строка)
pub type UserId = String;

/// Роль пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Moderator,
}

impl UserRole {
    /// Код роли (значение фильтра и сериализации)
    pub fn code(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
            UserRole::Moderator => "moderator",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Admin => "Администратор",
            UserRole::User => "Пользователь",
            UserRole::Moderator => "Модератор",
        }
    }

    pub fn all() -> Vec<UserRole> {
        vec![UserRole::Admin, UserRole::User, UserRole::Moderator]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "admin" => Some(UserRole::Admin),
            "user" => Some(UserRole::User),
            "moderator" => Some(UserRole::Moderator),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Статус учётной записи
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn code(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UserStatus::Active => "Активен",
            UserStatus::Inactive => "Неактивен",
        }
    }

    pub fn all() -> Vec<UserStatus> {
        vec![UserStatus::Active, UserStatus::Inactive]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(UserStatus::Active),
            "inactive" => Some(UserStatus::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Пользователь системы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub registration_date: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub avatar: Option<String>,
    pub login_count: u32,
    pub posts_count: u32,
    pub comments_count: u32,
}

/// Данные формы создания пользователя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub send_welcome_email: bool,
}

impl Default for NewUser {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: UserRole::User,
            send_welcome_email: false,
        }
    }
}

/// Опция выбора роли для выпадающих списков
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleOption {
    pub value: UserRole,
    pub title: &'static str,
}

/// Роли в порядке отображения
pub const USERS_ROLES_OPTIONS: [RoleOption; 3] = [
    RoleOption {
        value: UserRole::Admin,
        title: "Администратор",
    },
    RoleOption {
        value: UserRole::User,
        title: "Пользователь",
    },
    RoleOption {
        value: UserRole::Moderator,
        title: "Модератор",
    },
];
