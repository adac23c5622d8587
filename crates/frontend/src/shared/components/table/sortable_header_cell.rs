//! Компонент сортируемой ячейки заголовка таблицы
//!
//! # Примеры
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Email"
//!     sort_field=UserSortField::Email
//!     current_sort_field=Signal::derive(move || store.sort.sort_value.get())
//!     sort_direction=Signal::derive(move || store.sort.sort_direction.get())
//!     on_sort=Callback::new(move |field| store.sort_by(field))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use crate::shared::state::SortDirection;
use leptos::prelude::*;
use thaw::*;

/// Компонент сортируемой ячейки заголовка таблицы
///
/// Клик по заголовку передаёт поле в `on_sort`; индикатор (▲▼⇅) берётся
/// из текущего поля и направления сортировки.
#[component]
pub fn SortableHeaderCell<K>(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Поле для сортировки
    sort_field: K,

    /// Текущее поле сортировки
    #[prop(into)]
    current_sort_field: Signal<Option<K>>,

    /// Направление сортировки
    #[prop(into)]
    sort_direction: Signal<SortDirection>,

    /// Callback при клике на заголовок
    on_sort: Callback<K>,

    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Выравнивание заголовка (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView
where
    K: PartialEq + Clone + Send + Sync + 'static,
{
    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();
    let sort_field_for_class = sort_field;

    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell resizable=false min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(sort_field_for_click.clone())
            >
                {label}
                <span class=move || {
                    current_sort_field.with(|current| get_sort_class(current.as_ref(), &sort_field_for_class))
                }>
                    {move || {
                        current_sort_field.with(|current| {
                            get_sort_indicator(current.as_ref(), &sort_field_for_indicator, sort_direction.get())
                        })
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}
