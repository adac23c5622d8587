use crate::shared::icons::icon;
use leptos::prelude::*;

/// Сворачиваемая панель фильтров списка
///
/// В заголовке показывается число активных фильтров и кнопка их сброса,
/// справа от заголовка можно разместить пагинацию.
#[component]
pub fn FilterPanel(
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Число активных фильтров (для бейджа)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Сброс всех фильтров
    on_clear: Callback<()>,

    #[prop(into)]
    filter_content: ViewFn,

    #[prop(optional, into)]
    header_extra: Option<ViewFn>,

    /// Чипы активных фильтров
    #[prop(optional, into)]
    filter_tags: Option<ViewFn>,
) -> impl IntoView {
    let toggle_expanded = move |_| is_expanded.update(|e| *e = !*e);

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=toggle_expanded>
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron-down")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Фильтры"</span>
                    <Show when=move || { active_filters_count.get() > 0 }>
                        <span class="badge badge--primary">{move || active_filters_count.get()}</span>
                        <button
                            class="filter-panel__clear"
                            title="Сбросить фильтры"
                            on:click=move |e| {
                                e.stop_propagation();
                                on_clear.run(());
                            }
                        >
                            {icon("x")}
                        </button>
                    </Show>
                </div>
                {header_extra.map(|extra| view! {
                    <div class="filter-panel-header__center">{extra.run()}</div>
                })}
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {filter_content.run()}
                    {filter_tags.map(|tags| view! {
                        <div class="filter-panel__tags">{tags.run()}</div>
                    })}
                </div>
            </div>
        </div>
    }
}

/// Чип одного активного фильтра
#[component]
pub fn FilterTag(
    #[prop(into)]
    label: String,

    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}
