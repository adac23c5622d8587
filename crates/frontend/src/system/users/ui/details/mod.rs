use contracts::system::users::{NewUser, User, UserRole, UserStatus, USERS_ROLES_OPTIONS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::validate::{error_text_message, validate_email};
use crate::system::users::store::UsersStore;

/// Проверка полей формы до отправки в сервис
fn check_form(name: &str, email: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Введите имя");
    }
    if !validate_email(email.trim()) {
        return Err("Некорректный email");
    }
    Ok(())
}

#[component]
fn RoleSelect(value: RwSignal<String>, #[prop(into)] disabled: Signal<bool>) -> impl IntoView {
    view! {
        <select
            class="form__select"
            prop:value=move || value.get()
            on:change=move |ev| value.set(event_target_value(&ev))
            disabled=move || disabled.get()
        >
            {USERS_ROLES_OPTIONS.iter().map(|option| {
                let code = option.value.code();
                view! {
                    <option value=code selected=move || value.get() == code>
                        {option.title}
                    </option>
                }
            }).collect_view()}
        </select>
    }
}

#[component]
pub fn CreateUserForm(on_close: Callback<()>, on_created: Callback<User>) -> impl IntoView {
    let store = use_context::<UsersStore>().expect("UsersStore context not found");
    let defaults = NewUser::default();

    let name = RwSignal::new(defaults.name);
    let email = RwSignal::new(defaults.email);
    let role = RwSignal::new(defaults.role.code().to_string());
    let send_welcome_email = RwSignal::new(defaults.send_welcome_email);
    let (error, set_error) = signal::<Option<String>>(None);
    let saving = store.is_request_loading();

    let on_submit = move |_| {
        let name_value = name.get_untracked();
        let email_value = email.get_untracked();
        if let Err(message) = check_form(&name_value, &email_value) {
            set_error.set(Some(message.to_string()));
            return;
        }
        set_error.set(None);

        let user_data = NewUser {
            name: name_value.trim().to_string(),
            email: email_value.trim().to_string(),
            role: UserRole::from_code(&role.get_untracked()).unwrap_or(UserRole::User),
            send_welcome_email: send_welcome_email.get_untracked(),
        };

        spawn_local(async move {
            match store.add_new_user(user_data).await {
                Ok(user) => on_created.run(user),
                Err(e) => set_error.set(Some(error_text_message(&e))),
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">"Новый пользователь"</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Имя *"</Label>
                        <Input value=name disabled=saving />
                    </div>

                    <div class="form__group">
                        <Label>"Email *"</Label>
                        <Input value=email input_type=InputType::Email disabled=saving />
                    </div>

                    <div class="form__group">
                        <Label>"Роль"</Label>
                        <RoleSelect value=role disabled=saving />
                    </div>

                    <div class="form__group">
                        <Checkbox checked=send_welcome_email label="Отправить приветственное письмо" />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                        disabled=saving
                    >
                        "Отмена"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_submit disabled=saving>
                        {move || if saving.get() { "Сохранение..." } else { "Создать" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn EditUserForm(user: User, on_close: Callback<()>, on_saved: Callback<User>) -> impl IntoView {
    let store = use_context::<UsersStore>().expect("UsersStore context not found");

    let name = RwSignal::new(user.name.clone());
    let email = RwSignal::new(user.email.clone());
    let role = RwSignal::new(user.role.code().to_string());
    let is_active = RwSignal::new(user.status == UserStatus::Active);
    let (error, set_error) = signal::<Option<String>>(None);
    let saving = store.is_request_loading();

    let title = format!("Редактирование: {}", user.name);
    let original = StoredValue::new(user);

    let on_save = move |_| {
        let name_value = name.get_untracked();
        let email_value = email.get_untracked();
        if let Err(message) = check_form(&name_value, &email_value) {
            set_error.set(Some(message.to_string()));
            return;
        }
        set_error.set(None);

        let mut user_data = original.get_value();
        user_data.name = name_value.trim().to_string();
        user_data.email = email_value.trim().to_string();
        user_data.role = UserRole::from_code(&role.get_untracked()).unwrap_or(user_data.role);
        user_data.status = if is_active.get_untracked() {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        };
        let user_id = user_data.id.clone();

        spawn_local(async move {
            match store.update_user(user_id, user_data).await {
                Ok(user) => on_saved.run(user),
                Err(e) => set_error.set(Some(format!("Ошибка сохранения: {}", error_text_message(&e)))),
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Имя"</Label>
                        <Input value=name disabled=saving />
                    </div>

                    <div class="form__group">
                        <Label>"Email"</Label>
                        <Input value=email input_type=InputType::Email disabled=saving />
                    </div>

                    <div class="form__group">
                        <Label>"Роль"</Label>
                        <RoleSelect value=role disabled=saving />
                    </div>

                    <div class="form__group">
                        <Checkbox checked=is_active label="Активен" />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                        disabled=saving
                    >
                        "Отмена"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_save disabled=saving>
                        {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_form() {
        assert_eq!(check_form("", "a@b.co"), Err("Введите имя"));
        assert_eq!(check_form("   ", "a@b.co"), Err("Введите имя"));
        assert_eq!(check_form("Иван", "not-an-email"), Err("Некорректный email"));
        assert_eq!(check_form("Иван", " ivan@example.com "), Ok(()));
    }
}
