/// Универсальные утилиты для работы со списками (поиск, сортировка, подсветка)
use leptos::prelude::*;
use std::cmp::Ordering;
use std::ops::Range;

use crate::shared::state::SortDirection;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Проверяет, соответствует ли объект поисковому запросу
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Поле, по которому возможна сортировка
    type Field;

    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &Self::Field) -> Ordering;
}

/// Сортирует список по указанному полю.
///
/// Сортировка стабильная: при равенстве сохраняется исходный порядок.
pub fn sort_list<T: Sortable>(items: &mut [T], field: &T::Field, direction: SortDirection) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if direction.is_ascending() {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Фильтрует список по поисковому запросу (пустой запрос ничего не отсекает)
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    let filter = filter.trim();
    if filter.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

/// Сравнение строк без учёта регистра
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Диапазоны совпадений `filter` в `text` без учёта регистра
pub fn match_ranges(text: &str, filter: &str) -> Vec<Range<usize>> {
    let filter_lower = filter.trim().to_lowercase();
    if filter_lower.is_empty() {
        return Vec::new();
    }

    let text_lower = text.to_lowercase();
    // Смещения в нижнем регистре совпадают с исходными только при равной длине
    if text_lower.len() != text.len() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut last_pos = 0;
    while let Some(pos) = text_lower[last_pos..].find(&filter_lower) {
        let start = last_pos + pos;
        let end = start + filter_lower.len();
        ranges.push(start..end);
        last_pos = end;
    }
    ranges
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;
    for range in ranges {
        if range.start > last_pos {
            parts.push(view! { <span>{text[last_pos..range.start].to_string()}</span> }.into_any());
        }
        parts.push(view! {
            <span class="search-highlight">{text[range.clone()].to_string()}</span>
        }.into_any());
        last_pos = range.end;
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator<K: PartialEq>(
    current_field: Option<&K>,
    field: &K,
    direction: SortDirection,
) -> &'static str {
    if current_field == Some(field) {
        if direction.is_ascending() {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// CSS-класс индикатора сортировки
pub fn get_sort_class<K: PartialEq>(current_field: Option<&K>, field: &K) -> &'static str {
    if current_field == Some(field) {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}
