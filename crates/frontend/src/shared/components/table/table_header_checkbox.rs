//! Компонент чекбокса в заголовке таблицы для выбора всех строк
//!
//! # Примеры
//!
//! ```ignore
//! <TableHeaderCheckbox
//!     all_selected=store.selection.is_all_selected
//!     any_selected=Signal::derive(move || !store.selection.checked_items.get().is_empty())
//!     on_toggle=Callback::new(move |_| store.selection.toggle_select_all())
//! />
//! ```

use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

/// Компонент чекбокса в заголовке таблицы
///
/// Показывает три состояния: unchecked, checked, indeterminate.
/// Клик переключает между "выбрать все" и "снять все".
#[component]
pub fn TableHeaderCheckbox(
    /// Выбраны все строки страницы
    #[prop(into)]
    all_selected: Signal<bool>,

    /// Выбрана хотя бы одна строка
    #[prop(into)]
    any_selected: Signal<bool>,

    on_toggle: Callback<()>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate есть только у DOM-свойства, атрибута нет
    Effect::new(move |_| {
        let indeterminate = any_selected.get() && !all_selected.get();
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || all_selected.get()
                on:change=move |_| on_toggle.run(())
            />
        </TableHeaderCell>
    }
}
