//! Производные представления списка пользователей.
//!
//! Цепочка: роль → статус → период регистрации → поиск → сортировка → страница.
//! Каждый шаг — чистая функция от результата предыдущего и снимка состояния,
//! базовая коллекция не изменяется.

use contracts::system::users::User;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::shared::date_utils::{end_of_day, start_of_day};
use crate::shared::list_utils::{cmp_ignore_case, filter_list, sort_list, Searchable, Sortable};
use crate::shared::state::pagination::page_range;
use crate::shared::state::SortDirection;

/// Ключи фильтров списка пользователей
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserFilterKey {
    Role,
    Status,
    DateFrom,
    DateTo,
    Search,
}

impl UserFilterKey {
    pub fn all() -> [UserFilterKey; 5] {
        [
            UserFilterKey::Role,
            UserFilterKey::Status,
            UserFilterKey::DateFrom,
            UserFilterKey::DateTo,
            UserFilterKey::Search,
        ]
    }

    /// Человекочитаемое название для чипов фильтра
    pub fn display_name(&self) -> &'static str {
        match self {
            UserFilterKey::Role => "Роль",
            UserFilterKey::Status => "Статус",
            UserFilterKey::DateFrom => "Дата с",
            UserFilterKey::DateTo => "Дата по",
            UserFilterKey::Search => "Поиск",
        }
    }
}

/// Поля сортировки пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserSortField {
    Id,
    Name,
    Email,
    Role,
    Status,
    RegistrationDate,
    LastActivity,
    LoginCount,
    PostsCount,
    CommentsCount,
}

impl Sortable for User {
    type Field = UserSortField;

    fn compare_by_field(&self, other: &Self, field: &UserSortField) -> Ordering {
        match field {
            UserSortField::Id => cmp_ignore_case(&self.id, &other.id),
            UserSortField::Name => cmp_ignore_case(&self.name, &other.name),
            UserSortField::Email => cmp_ignore_case(&self.email, &other.email),
            UserSortField::Role => self.role.code().cmp(other.role.code()),
            UserSortField::Status => self.status.code().cmp(other.status.code()),
            UserSortField::RegistrationDate => self.registration_date.cmp(&other.registration_date),
            UserSortField::LastActivity => self.last_activity.cmp(&other.last_activity),
            UserSortField::LoginCount => self.login_count.cmp(&other.login_count),
            UserSortField::PostsCount => self.posts_count.cmp(&other.posts_count),
            UserSortField::CommentsCount => self.comments_count.cmp(&other.comments_count),
        }
    }
}

impl Searchable for User {
    fn matches_filter(&self, filter: &str) -> bool {
        let query = filter.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
            || self.id.to_lowercase().contains(&query)
    }
}

/// Снимок фильтров, сортировки и пагинации для одного пересчёта
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsersQuery {
    pub role: String,
    pub status: String,
    pub date_from: String,
    pub date_to: String,
    pub search: String,
    pub sort_value: Option<UserSortField>,
    pub sort_direction: SortDirection,
}

impl UsersQuery {
    pub fn from_filters(
        filters: &BTreeMap<UserFilterKey, String>,
        sort_value: Option<UserSortField>,
        sort_direction: SortDirection,
    ) -> Self {
        let value = |key: UserFilterKey| filters.get(&key).cloned().unwrap_or_default();
        Self {
            role: value(UserFilterKey::Role),
            status: value(UserFilterKey::Status),
            date_from: value(UserFilterKey::DateFrom),
            date_to: value(UserFilterKey::DateTo),
            search: value(UserFilterKey::Search),
            sort_value,
            sort_direction,
        }
    }
}

pub fn filter_by_role(users: Vec<User>, role: &str) -> Vec<User> {
    if role.is_empty() {
        return users;
    }
    users.into_iter().filter(|u| u.role.code() == role).collect()
}

pub fn filter_by_status(users: Vec<User>, status: &str) -> Vec<User> {
    if status.is_empty() {
        return users;
    }
    users.into_iter().filter(|u| u.status.code() == status).collect()
}

/// Фильтр по дате регистрации: нижняя граница включительно, верхняя — до конца дня
pub fn filter_by_date_range(users: Vec<User>, date_from: &str, date_to: &str) -> Vec<User> {
    let from = start_of_day(date_from);
    let to = end_of_day(date_to);
    if from.is_none() && to.is_none() {
        return users;
    }

    users
        .into_iter()
        .filter(|u| {
            from.map_or(true, |from| u.registration_date >= from)
                && to.map_or(true, |to| u.registration_date <= to)
        })
        .collect()
}

pub fn search_users(users: Vec<User>, search: &str) -> Vec<User> {
    filter_list(users, search)
}

pub fn sort_users(mut users: Vec<User>, sort_value: Option<UserSortField>, direction: SortDirection) -> Vec<User> {
    if let Some(field) = sort_value {
        sort_list(&mut users, &field, direction);
    }
    users
}

/// Срез страницы (страницы нумеруются с 1)
pub fn paginate(users: &[User], page: usize, page_size: usize) -> Vec<User> {
    users[page_range(page, page_size, users.len())].to_vec()
}

/// Фильтры, поиск и сортировка без пагинации
pub fn derive_filtered(users: &[User], query: &UsersQuery) -> Vec<User> {
    let result = filter_by_role(users.to_vec(), &query.role);
    let result = filter_by_status(result, &query.status);
    let result = filter_by_date_range(result, &query.date_from, &query.date_to);
    let result = search_users(result, &query.search);
    sort_users(result, query.sort_value, query.sort_direction)
}
