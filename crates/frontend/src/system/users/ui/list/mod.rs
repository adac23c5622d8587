use chrono::{DateTime, Utc};
use contracts::system::users::{User, UserRole, UserStatus, USERS_ROLES_OPTIONS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::table::{SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::components::{DateInput, FilterPanel, FilterTag, PaginationControls};
use crate::shared::date_utils::{format_date, format_datetime};
use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;
use crate::shared::validate::error_text_message;
use crate::system::users::pipeline::{UserFilterKey, UserSortField};
use crate::system::users::store::UsersStore;
use crate::system::users::ui::details::{CreateUserForm, EditUserForm};
use crate::system::users::utils::{activity_class, avatar_src, role_badge_class, status_badge_class};

/// Подпись значения фильтра для чипа
fn filter_tag_label(key: UserFilterKey, value: &str) -> String {
    let shown = match key {
        UserFilterKey::Role => UserRole::from_code(value)
            .map(|role| role.display_name().to_string())
            .unwrap_or_else(|| value.to_string()),
        UserFilterKey::Status => UserStatus::from_code(value)
            .map(|status| status.display_name().to_string())
            .unwrap_or_else(|| value.to_string()),
        UserFilterKey::Search => format!("\"{}\"", value),
        UserFilterKey::DateFrom | UserFilterKey::DateTo => value.to_string(),
    };
    format!("{}: {}", key.display_name(), shown)
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    let store = use_context::<UsersStore>().expect("UsersStore context not found");
    let (error, set_error) = signal::<Option<String>>(None);
    let show_create_form = RwSignal::new(false);
    let editing_user: RwSignal<Option<User>> = RwSignal::new(None);
    let filters_expanded = RwSignal::new(true);
    let loading = store.is_request_loading();

    let load_data = move || {
        set_error.set(None);
        spawn_local(async move {
            if let Err(e) = store.get_users().await {
                set_error.set(Some(format!("Не удалось загрузить пользователей: {}", error_text_message(&e))));
            }
        });
    };

    Effect::new(move |_| load_data());

    let delete_user = move |user_id: String| {
        spawn_local(async move {
            if let Err(e) = store.delete_user(user_id).await {
                set_error.set(Some(format!("Ошибка удаления: {}", error_text_message(&e))));
            }
        });
    };

    let delete_selected = move |_| {
        spawn_local(async move {
            if let Err(e) = store.delete_selected().await {
                set_error.set(Some(format!("Ошибка удаления: {}", error_text_message(&e))));
            }
        });
    };

    let export_csv = move |_| {
        if let Err(e) = store.export_csv(None) {
            set_error.set(Some(error_text_message(&e)));
        }
    };

    let selected_count = Signal::derive(move || store.selection.checked_items.with(Vec::len));
    let current_sort = Signal::derive(move || store.sort.sort_value.get());
    let sort_direction = Signal::derive(move || store.sort.sort_direction.get());
    let on_sort = Callback::new(move |field: UserSortField| store.sort_by(field));
    let filter_value = move |key: UserFilterKey| Signal::derive(move || store.filters.value(&key));
    let set_filter = move |key: UserFilterKey| Callback::new(move |value: String| store.set_filters([(key, value)]));

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("users")}
                    <h1 class="page__title">"Пользователи"</h1>
                    <Badge>{move || store.filtered_users.with(Vec::len).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Show when=move || { selected_count.get() > 0 }>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=delete_selected
                            disabled=loading
                        >
                            {icon("trash")}
                            {move || format!(" Удалить ({})", selected_count.get())}
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Secondary on_click=export_csv>
                        {icon("download")}
                        " CSV"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| show_create_form.set(true)
                    >
                        {icon("plus")}
                        " Новый"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Загрузка..." } else { " Обновить" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <FilterPanel
                    is_expanded=filters_expanded
                    active_filters_count=Signal::derive(move || store.filters.active_count())
                    on_clear=Callback::new(move |_| store.clear_filters(None))
                    header_extra=move || view! {
                        <PaginationControls
                            current_page=store.pagination.current_page
                            total_pages=store.pagination.total_pages
                            visible_pages=store.pagination.visible_pages
                            range=Signal::derive(move || {
                                (store.pagination.pagination_start.get(), store.pagination.pagination_end.get())
                            })
                            total_count=Signal::derive(move || store.filtered_users.with(Vec::len))
                            page_size=store.pagination.page_size
                            on_page_change=Callback::new(move |page| store.pagination.go_to_page(page))
                            on_page_size_change=Callback::new(move |size| store.pagination.handle_page_size_change(size))
                        />
                    }
                    filter_content=move || view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div class="form__group" style="flex: 1; max-width: 320px;">
                                <Label>"Поиск"</Label>
                                <input
                                    type="search"
                                    class="form__input"
                                    placeholder="Имя или Email..."
                                    prop:value=filter_value(UserFilterKey::Search)
                                    on:input=move |ev| store.set_search(event_target_value(&ev))
                                />
                            </div>
                            <div class="form__group">
                                <Label>"Роль"</Label>
                                <select
                                    class="form__select"
                                    prop:value=filter_value(UserFilterKey::Role)
                                    on:change=move |ev| set_filter(UserFilterKey::Role).run(event_target_value(&ev))
                                >
                                    <option value="">"Все роли"</option>
                                    {USERS_ROLES_OPTIONS.iter().map(|option| {
                                        let code = option.value.code();
                                        view! {
                                            <option value=code selected=move || store.filters.value(&UserFilterKey::Role) == code>
                                                {option.title}
                                            </option>
                                        }
                                    }).collect_view()}
                                </select>
                            </div>
                            <div class="form__group">
                                <Label>"Статус"</Label>
                                <select
                                    class="form__select"
                                    prop:value=filter_value(UserFilterKey::Status)
                                    on:change=move |ev| set_filter(UserFilterKey::Status).run(event_target_value(&ev))
                                >
                                    <option value="">"Все статусы"</option>
                                    {UserStatus::all().into_iter().map(|status| {
                                        let code = status.code();
                                        view! {
                                            <option value=code selected=move || store.filters.value(&UserFilterKey::Status) == code>
                                                {status.display_name()}
                                            </option>
                                        }
                                    }).collect_view()}
                                </select>
                            </div>
                            <div class="form__group">
                                <Label>"Регистрация с"</Label>
                                <DateInput
                                    value=filter_value(UserFilterKey::DateFrom)
                                    on_change=set_filter(UserFilterKey::DateFrom)
                                    title="Дата регистрации с"
                                />
                            </div>
                            <div class="form__group">
                                <Label>"по"</Label>
                                <DateInput
                                    value=filter_value(UserFilterKey::DateTo)
                                    on_change=set_filter(UserFilterKey::DateTo)
                                    title="Дата регистрации по"
                                />
                            </div>
                        </Flex>
                    }
                    filter_tags=move || view! {
                        {move || {
                            store.filters.filters.get()
                                .into_iter()
                                .filter(|(_, value)| !value.trim().is_empty())
                                .map(|(key, value)| view! {
                                    <FilterTag
                                        label=filter_tag_label(key, &value)
                                        on_remove=Callback::new(move |_| store.clear_filters(Some(std::slice::from_ref(&key))))
                                    />
                                })
                                .collect_view()
                        }}
                    }
                />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    all_selected=store.selection.is_all_selected
                                    any_selected=Signal::derive(move || selected_count.get() > 0)
                                    on_toggle=Callback::new(move |_| store.selection.toggle_select_all())
                                />
                                <SortableHeaderCell label="Имя" sort_field=UserSortField::Name current_sort_field=current_sort sort_direction=sort_direction on_sort=on_sort min_width=180.0 />
                                <SortableHeaderCell label="Email" sort_field=UserSortField::Email current_sort_field=current_sort sort_direction=sort_direction on_sort=on_sort min_width=180.0 />
                                <SortableHeaderCell label="Роль" sort_field=UserSortField::Role current_sort_field=current_sort sort_direction=sort_direction on_sort=on_sort min_width=110.0 />
                                <SortableHeaderCell label="Статус" sort_field=UserSortField::Status current_sort_field=current_sort sort_direction=sort_direction on_sort=on_sort min_width=90.0 />
                                <SortableHeaderCell label="Регистрация" sort_field=UserSortField::RegistrationDate current_sort_field=current_sort sort_direction=sort_direction on_sort=on_sort min_width=110.0 />
                                <SortableHeaderCell label="Активность" sort_field=UserSortField::LastActivity current_sort_field=current_sort sort_direction=sort_direction on_sort=on_sort min_width=150.0 />
                                <SortableHeaderCell label="Входы" sort_field=UserSortField::LoginCount current_sort_field=current_sort sort_direction=sort_direction on_sort=on_sort min_width=70.0 align="right" />
                                <SortableHeaderCell label="Посты" sort_field=UserSortField::PostsCount current_sort_field=current_sort sort_direction=sort_direction on_sort=on_sort min_width=70.0 align="right" />
                                <SortableHeaderCell label="Комм." sort_field=UserSortField::CommentsCount current_sort_field=current_sort sort_direction=sort_direction on_sort=on_sort min_width=70.0 align="right" />
                                <TableHeaderCell resizable=false min_width=80.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            {move || {
                                let search = store.filters.value(&UserFilterKey::Search);
                                let now = Utc::now();
                                store.page_users.get()
                                    .into_iter()
                                    .map(|user| view! {
                                        <UserRow
                                            user=user
                                            search=search.clone()
                                            now=now
                                            on_edit=Callback::new(move |user| editing_user.set(Some(user)))
                                            on_delete=Callback::new(delete_user)
                                        />
                                    })
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>

                    <Show when=move || { !loading.get() && store.filtered_users.with(Vec::is_empty) }>
                        <div class="table__empty">"Пользователи не найдены"</div>
                    </Show>
                </div>

                <Show when=move || show_create_form.get()>
                    <CreateUserForm
                        on_close=Callback::new(move |_| show_create_form.set(false))
                        on_created=Callback::new(move |_| show_create_form.set(false))
                    />
                </Show>

                {move || editing_user.get().map(|user| view! {
                    <EditUserForm
                        user=user
                        on_close=Callback::new(move |_| editing_user.set(None))
                        on_saved=Callback::new(move |_| editing_user.set(None))
                    />
                })}
            </div>
        </div>
    }
}

#[component]
fn UserRow(
    user: User,
    search: String,
    now: DateTime<Utc>,
    on_edit: Callback<User>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let store = use_context::<UsersStore>().expect("UsersStore context not found");

    let user_id = user.id.clone();
    let id_for_check = user_id.clone();
    let id_for_toggle = user_id.clone();

    let avatar = avatar_src(&user);
    let name_view = highlight_matches(&user.name, &search);
    let email_view = highlight_matches(&user.email, &search);
    let role_class = role_badge_class(user.role);
    let role_name = user.role.display_name();
    let status_class = status_badge_class(user.status);
    let status_name = user.status.display_name();
    let registered = format_date(&user.registration_date);
    let last_activity_class = activity_class(&user.last_activity, &now);
    let last_activity = format_datetime(&user.last_activity);
    let (login_count, posts_count, comments_count) = (user.login_count, user.posts_count, user.comments_count);
    let user_for_edit = user;

    view! {
        <TableRow>
            <TableCellCheckbox
                checked=Signal::derive(move || store.selection.is_selected(&id_for_check))
                on_toggle=Callback::new(move |_| store.selection.toggle_select_item(id_for_toggle.clone()))
            />
            <TableCell>
                <TableCellLayout truncate=true>
                    <div class="user-cell">
                        <img class="user-cell__avatar" src=avatar alt="" width="32" height="32" />
                        <span style="font-weight: 500;">{name_view}</span>
                    </div>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>{email_view}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <span class=role_class>{role_name}</span>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <span class=status_class>{status_name}</span>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{registered}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <span class=last_activity_class>{last_activity}</span>
                </TableCellLayout>
            </TableCell>
            <TableCell class="table__cell--number">{login_count}</TableCell>
            <TableCell class="table__cell--number">{posts_count}</TableCell>
            <TableCell class="table__cell--number">{comments_count}</TableCell>
            <TableCell>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| on_edit.run(user_for_edit.clone())
                    attr:title="Редактировать"
                >
                    {icon("edit")}
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| on_delete.run(user_id.clone())
                    attr:title="Удалить"
                >
                    {icon("trash")}
                </Button>
            </TableCell>
        </TableRow>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_tag_label() {
        assert_eq!(filter_tag_label(UserFilterKey::Role, "admin"), "Роль: Администратор");
        assert_eq!(filter_tag_label(UserFilterKey::Status, "inactive"), "Статус: Неактивен");
        assert_eq!(filter_tag_label(UserFilterKey::Search, "ivan"), "Поиск: \"ivan\"");
        assert_eq!(filter_tag_label(UserFilterKey::DateFrom, "2024-01-01"), "Дата с: 2024-01-01");
        assert_eq!(filter_tag_label(UserFilterKey::Role, "unknown"), "Роль: unknown");
    }
}
