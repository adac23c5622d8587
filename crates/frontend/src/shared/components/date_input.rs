use leptos::prelude::*;

/// Поле даты с нативным календарём браузера
///
/// Значение в формате yyyy-mm-dd; пустая строка означает "без даты".
#[component]
pub fn DateInput(
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)]
    title: Option<String>,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="form__input form__input--date"
            title=title
            prop:value=value
            on:input=move |ev| on_change.run(event_target_value(&ev))
        />
    }
}
