use crate::shared::config::load_config;
use crate::system::users::store::UsersStore;
use crate::system::users::ui::list::UsersListPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();

    // Provide the users store to the whole app via context.
    provide_context(UsersStore::new(&config.users, config.mock));

    view! {
        <UsersListPage />
    }
}
