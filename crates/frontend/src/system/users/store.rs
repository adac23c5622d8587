use contracts::system::users::{NewUser, User, UserId};
use leptos::prelude::*;

use super::error::UsersError;
use super::pipeline::{derive_filtered, paginate, UserFilterKey, UserSortField, UsersQuery};
use super::service::MockUsersService;
use crate::shared::config::{MockServiceOptions, UsersStoreOptions};
use crate::shared::export::{export_to_csv, DEFAULT_CSV_FILENAME};
use crate::shared::state::{ListFilters, Pagination, RequestLoading, Selection, SortState};

fn user_id(user: &User) -> UserId {
    user.id.clone()
}

/// Стор списка пользователей
///
/// Хранит базовую коллекцию и состояние фильтров, сортировки, пагинации и выбора.
/// Производные представления пересчитываются из них через `Memo`.
#[derive(Clone, Copy)]
pub struct UsersStore {
    pub users: RwSignal<Vec<User>>,
    pub loading: RequestLoading,
    pub filters: ListFilters<UserFilterKey>,
    pub sort: SortState<UserSortField>,
    pub pagination: Pagination,
    pub selection: Selection<User, UserId>,
    /// Отфильтрованная и отсортированная коллекция (все страницы)
    pub filtered_users: Memo<Vec<User>>,
    /// Записи текущей страницы
    pub page_users: Memo<Vec<User>>,
    service: StoredValue<MockUsersService>,
}

impl UsersStore {
    pub fn new(options: &UsersStoreOptions, mock: MockServiceOptions) -> Self {
        let users = RwSignal::new(Vec::<User>::new());
        let filters = ListFilters::new(UserFilterKey::all().map(|key| (key, String::new())));
        let sort = SortState::new(Some(UserSortField::Id));

        let filtered_users = Memo::new(move |_| {
            let query = filters.filters.with(|f| {
                UsersQuery::from_filters(f, sort.sort_value.get(), sort.sort_direction.get())
            });
            users.with(|users| derive_filtered(users, &query))
        });

        let pagination = Pagination::new(
            Signal::derive(move || filtered_users.with(Vec::len)),
            options.init_page_size,
        );

        let page_users = Memo::new(move |_| {
            let page = pagination.current_page.get();
            let page_size = pagination.page_size.get();
            filtered_users.with(|users| paginate(users, page, page_size))
        });

        let selection = Selection::new(Signal::derive(move || page_users.get()), user_id);

        Self {
            users,
            loading: RequestLoading::new(),
            filters,
            sort,
            pagination,
            selection,
            filtered_users,
            page_users,
            service: StoredValue::new(MockUsersService::new(options.endpoint.clone(), mock)),
        }
    }

    pub fn is_request_loading(&self) -> Signal<bool> {
        self.loading.is_request_loading()
    }

    /// Слияние фильтров; текущая страница сбрасывается на первую
    pub fn set_filters(&self, values: impl IntoIterator<Item = (UserFilterKey, String)>) {
        self.filters.set_filters(values);
        self.after_filters_change();
    }

    pub fn clear_filters(&self, keys: Option<&[UserFilterKey]>) {
        self.filters.clear_filters(keys);
        self.after_filters_change();
    }

    /// Отметки остаются только у записей, прошедших фильтры
    fn after_filters_change(&self) {
        self.pagination.reset();
        let visible: Vec<UserId> = self
            .filtered_users
            .with_untracked(|users| users.iter().map(user_id).collect());
        self.selection.retain_keys(&visible);
    }

    pub fn set_search(&self, query: String) {
        self.set_filters([(UserFilterKey::Search, query)]);
    }

    pub fn sort_by(&self, field: UserSortField) {
        self.sort.sort_by(field);
    }

    pub async fn get_users(&self) -> Result<(), UsersError> {
        let store = *self;
        let service = self.service.get_value();
        log::debug!("Fetching users from {}", service.endpoint());

        let result = self
            .loading
            .track(async move {
                let users = service.get_users().await?;
                let count = users.len();
                store.users.set(users);
                store.pagination.reset();
                Ok::<_, UsersError>(count)
            })
            .await;

        match result {
            Ok(count) => {
                log::info!("Loaded {} users", count);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load users: {}", e);
                Err(e)
            }
        }
    }

    pub async fn add_new_user(&self, user_data: NewUser) -> Result<User, UsersError> {
        let store = *self;
        let service = self.service.get_value();

        let result = self
            .loading
            .track(async move {
                let new_user = service.add_new_user(user_data).await?;
                store.users.update(|users| users.insert(0, new_user.clone()));
                Ok::<_, UsersError>(new_user)
            })
            .await;

        match &result {
            Ok(user) => log::info!("User {} created", user.id),
            Err(e) => log::error!("Failed to create user: {}", e),
        }
        result
    }

    pub async fn delete_user(&self, user_id: UserId) -> Result<UserId, UsersError> {
        let store = *self;
        let service = self.service.get_value();

        let result = self
            .loading
            .track(async move {
                let deleted_id = service.delete_user(user_id).await?;
                store.users.update(|users| {
                    if let Some(index) = users.iter().position(|u| u.id == deleted_id) {
                        users.remove(index);
                    }
                });
                store.selection.remove_keys(std::slice::from_ref(&deleted_id));
                store.pagination.clamp_to_total();
                Ok::<_, UsersError>(deleted_id)
            })
            .await;

        match &result {
            Ok(id) => log::info!("User {} deleted", id),
            Err(e) => log::error!("Failed to delete user: {}", e),
        }
        result
    }

    pub async fn delete_users_multiple(&self, user_ids: Vec<UserId>) -> Result<Vec<UserId>, UsersError> {
        let store = *self;
        let service = self.service.get_value();

        let result = self
            .loading
            .track(async move {
                let deleted_ids = service.delete_users_multiple(user_ids).await?;
                if !deleted_ids.is_empty() {
                    store
                        .users
                        .update(|users| users.retain(|u| !deleted_ids.contains(&u.id)));
                    store.selection.remove_keys(&deleted_ids);
                    store.pagination.clamp_to_total();
                }
                Ok::<_, UsersError>(deleted_ids)
            })
            .await;

        match &result {
            Ok(ids) => log::info!("{} users deleted", ids.len()),
            Err(e) => log::error!("Failed to delete users: {}", e),
        }
        result
    }

    /// Удалить отмеченных пользователей
    pub async fn delete_selected(&self) -> Result<Vec<UserId>, UsersError> {
        let ids = self.selection.checked_items.get_untracked();
        self.delete_users_multiple(ids).await
    }

    pub async fn update_user(&self, user_id: UserId, user_data: User) -> Result<User, UsersError> {
        let store = *self;
        let service = self.service.get_value();

        let result = self
            .loading
            .track(async move {
                let updated = service.update_user(user_id, user_data).await?;
                let mut found = false;
                store.users.update(|users| {
                    if let Some(existing) = users.iter_mut().find(|u| u.id == updated.id) {
                        *existing = updated.clone();
                        found = true;
                    }
                });
                if found {
                    Ok::<_, UsersError>(updated)
                } else {
                    Err(UsersError::NotFound(updated.id))
                }
            })
            .await;

        match &result {
            Ok(user) => log::info!("User {} updated", user.id),
            Err(e) => log::error!("Failed to update user: {}", e),
        }
        result
    }

    /// Выгрузка отфильтрованного списка (всех страниц) в CSV
    pub fn export_csv(&self, filename: Option<&str>) -> Result<(), UsersError> {
        let users = self.filtered_users.get_untracked();
        export_to_csv(users.as_slice(), filename.unwrap_or(DEFAULT_CSV_FILENAME))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::state::{PageItem, SortDirection};
    use contracts::system::users::{UserRole, UserStatus};

    fn store_with(count: usize, page_size: usize) -> UsersStore {
        let options = UsersStoreOptions {
            init_page_size: page_size,
            ..UsersStoreOptions::default()
        };
        let mock = MockServiceOptions {
            users_count: count,
            ..MockServiceOptions::default().without_latency()
        };
        UsersStore::new(&options, mock)
    }

    fn user(id: &str, email: &str, role: UserRole) -> User {
        User {
            id: id.to_string(),
            name: format!("Пользователь {}", id),
            email: email.to_string(),
            role,
            status: UserStatus::Active,
            registration_date: "2020-01-01T00:00:00Z".parse().unwrap(),
            last_activity: "2024-01-01T00:00:00Z".parse().unwrap(),
            avatar: None,
            login_count: 0,
            posts_count: 0,
            comments_count: 0,
        }
    }

    fn ids(users: &[User]) -> Vec<String> {
        users.iter().map(|u| u.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_get_users_populates_pages() {
        let owner = Owner::new();
        owner.set();

        let store = store_with(23, 10);
        store.get_users().await.unwrap();

        assert!(!store.is_request_loading().get());
        assert_eq!(store.users.get().len(), 23);
        assert_eq!(store.pagination.total_pages.get(), 3);
        assert_eq!(store.page_users.get().len(), 10);

        store.pagination.go_to_page(3);
        assert_eq!(store.page_users.get().len(), 3);
        assert_eq!(store.pagination.pagination_start.get(), 21);
        assert_eq!(store.pagination.pagination_end.get(), 23);
        assert_eq!(
            store.pagination.visible_pages.get(),
            vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3)]
        );
    }

    #[test]
    fn test_filter_and_search_chain() {
        let owner = Owner::new();
        owner.set();

        let store = store_with(0, 25);
        store.users.set(vec![
            user("1", "one@example.com", UserRole::Admin),
            user("2", "two@example.com", UserRole::User),
            user("3", "three@example.com", UserRole::Admin),
        ]);

        store.set_filters([(UserFilterKey::Role, "admin".to_string())]);
        assert_eq!(ids(&store.filtered_users.get()), vec!["1", "3"]);

        store.set_search("three".to_string());
        assert_eq!(ids(&store.page_users.get()), vec!["3"]);

        store.clear_filters(Some(&[UserFilterKey::Search]));
        assert_eq!(ids(&store.filtered_users.get()), vec!["1", "3"]);

        store.clear_filters(None);
        assert_eq!(store.filtered_users.get().len(), 3);
        assert_eq!(store.users.get().len(), 3);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let owner = Owner::new();
        owner.set();

        let store = store_with(0, 1);
        store.users.set(vec![
            user("1", "one@example.com", UserRole::Admin),
            user("2", "two@example.com", UserRole::Admin),
        ]);
        store.pagination.go_to_page(2);
        assert_eq!(store.pagination.current_page.get(), 2);

        store.set_filters([(UserFilterKey::Status, "active".to_string())]);
        assert_eq!(store.pagination.current_page.get(), 1);
    }

    #[test]
    fn test_sort_by_toggles_direction() {
        let owner = Owner::new();
        owner.set();

        let store = store_with(0, 25);
        store.users.set(vec![
            user("b", "b@example.com", UserRole::User),
            user("a", "a@example.com", UserRole::User),
            user("c", "c@example.com", UserRole::User),
        ]);

        assert_eq!(ids(&store.page_users.get()), vec!["a", "b", "c"]);
        store.sort_by(UserSortField::Id);
        assert_eq!(store.sort.sort_direction.get(), SortDirection::Desc);
        assert_eq!(ids(&store.page_users.get()), vec!["c", "b", "a"]);

        store.sort_by(UserSortField::Email);
        assert_eq!(store.sort.sort_direction.get(), SortDirection::Asc);
        assert_eq!(ids(&store.page_users.get()), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_add_and_delete_users() {
        let owner = Owner::new();
        owner.set();

        let store = store_with(0, 25);
        store.users.set(vec![user("1", "one@example.com", UserRole::User)]);

        let created = store
            .add_new_user(NewUser {
                name: "Новый".to_string(),
                email: "new@example.com".to_string(),
                role: UserRole::Admin,
                send_welcome_email: false,
            })
            .await
            .unwrap();
        assert_eq!(store.users.get()[0].id, created.id);
        assert_eq!(store.users.get().len(), 2);

        store.selection.toggle_select_item(created.id.clone());
        store.delete_user(created.id.clone()).await.unwrap();
        assert_eq!(ids(&store.users.get()), vec!["1"]);
        assert!(store.selection.checked_items.get().is_empty());

        // Удаление несуществующего id ничего не меняет
        store.delete_user("missing".to_string()).await.unwrap();
        assert_eq!(store.users.get().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_selected() {
        let owner = Owner::new();
        owner.set();

        let store = store_with(0, 25);
        store.users.set(vec![
            user("1", "one@example.com", UserRole::User),
            user("2", "two@example.com", UserRole::User),
            user("3", "three@example.com", UserRole::User),
        ]);
        store.selection.toggle_select_item("1".to_string());
        store.selection.toggle_select_item("3".to_string());

        let deleted = store.delete_selected().await.unwrap();
        assert_eq!(deleted, vec!["1".to_string(), "3".to_string()]);
        assert_eq!(ids(&store.users.get()), vec!["2"]);
        assert!(store.selection.checked_items.get().is_empty());
        assert!(!store.loading.is_loading.get());
    }

    #[tokio::test]
    async fn test_deleting_last_page_moves_to_previous_page() {
        let owner = Owner::new();
        owner.set();

        let store = store_with(0, 2);
        store.users.set(vec![
            user("1", "one@example.com", UserRole::User),
            user("2", "two@example.com", UserRole::User),
            user("3", "three@example.com", UserRole::User),
        ]);
        store.pagination.go_to_page(2);
        store.selection.toggle_select_all();
        assert_eq!(store.selection.checked_items.get(), vec!["3".to_string()]);

        store.delete_selected().await.unwrap();
        assert_eq!(store.pagination.total_pages.get(), 1);
        assert_eq!(store.pagination.current_page.get(), 1);
        assert_eq!(store.pagination.pagination_start.get(), 1);
        assert_eq!(store.pagination.pagination_end.get(), 2);
        assert_eq!(ids(&store.page_users.get()), vec!["1", "2"]);

        store.delete_user("1".to_string()).await.unwrap();
        store.delete_user("2".to_string()).await.unwrap();
        assert_eq!(store.pagination.current_page.get(), 1);
        assert_eq!(store.pagination.pagination_start.get(), 0);
        assert_eq!(store.pagination.pagination_end.get(), 0);
    }

    #[tokio::test]
    async fn test_filter_change_drops_hidden_selection() {
        let owner = Owner::new();
        owner.set();

        let store = store_with(0, 25);
        store.users.set(vec![
            user("1", "one@example.com", UserRole::Admin),
            user("2", "two@example.com", UserRole::User),
            user("3", "three@example.com", UserRole::Admin),
        ]);
        store.selection.toggle_select_all();

        store.set_filters([(UserFilterKey::Role, "admin".to_string())]);
        assert_eq!(store.selection.checked_items.get(), vec!["1".to_string(), "3".to_string()]);

        store.set_search("three".to_string());
        assert_eq!(store.selection.checked_items.get(), vec!["3".to_string()]);

        store.clear_filters(None);
        let deleted = store.delete_selected().await.unwrap();
        assert_eq!(deleted, vec!["3".to_string()]);
        assert_eq!(ids(&store.users.get()), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_update_user() {
        let owner = Owner::new();
        owner.set();

        let store = store_with(0, 25);
        store.users.set(vec![
            user("1", "one@example.com", UserRole::User),
            user("2", "two@example.com", UserRole::User),
        ]);

        let mut changed = user("2", "renamed@example.com", UserRole::Moderator);
        changed.status = UserStatus::Inactive;
        store.update_user("2".to_string(), changed.clone()).await.unwrap();
        assert_eq!(store.users.get()[1], changed);

        let err = store
            .update_user("9".to_string(), user("9", "nine@example.com", UserRole::User))
            .await
            .unwrap_err();
        assert_eq!(err, UsersError::NotFound("9".to_string()));
        assert!(!store.loading.is_loading.get());
    }

    #[tokio::test]
    async fn test_errors_propagate_after_loading_reset() {
        let owner = Owner::new();
        owner.set();

        let store = store_with(0, 25);
        let err = store
            .add_new_user(NewUser {
                name: "Имя".to_string(),
                email: "broken".to_string(),
                ..NewUser::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err, UsersError::InvalidEmail("broken".to_string()));
        assert!(!store.is_request_loading().get());
        assert!(store.users.get().is_empty());
    }

    #[test]
    fn test_select_all_on_current_page() {
        let owner = Owner::new();
        owner.set();

        let store = store_with(0, 2);
        store.users.set(vec![
            user("1", "one@example.com", UserRole::User),
            user("2", "two@example.com", UserRole::User),
            user("3", "three@example.com", UserRole::User),
        ]);

        store.selection.toggle_select_all();
        assert_eq!(store.selection.checked_items.get(), vec!["1".to_string(), "2".to_string()]);
        assert!(store.selection.is_all_selected.get());

        store.pagination.go_to_page(2);
        assert!(!store.selection.is_all_selected.get());
    }
}
