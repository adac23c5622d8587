use leptos::prelude::*;
use std::collections::BTreeMap;

/// Слияние значений фильтров поверх текущих (shallow merge)
pub fn merge_filters<K: Ord>(
    filters: &mut BTreeMap<K, String>,
    values: impl IntoIterator<Item = (K, String)>,
) {
    filters.extend(values);
}

/// Сброс фильтров в пустую строку: всех, если `keys` пуст или `None`, иначе только указанных
pub fn clear_filter_values<K: Ord + Clone>(filters: &mut BTreeMap<K, String>, keys: Option<&[K]>) {
    match keys {
        Some(keys) if !keys.is_empty() => {
            for key in keys {
                filters.insert(key.clone(), String::new());
            }
        }
        _ => {
            for value in filters.values_mut() {
                value.clear();
            }
        }
    }
}

/// Набор фильтров списка: ключ → значение, пустая строка означает «без ограничения»
pub struct ListFilters<K: 'static> {
    pub filters: RwSignal<BTreeMap<K, String>>,
}

impl<K> Clone for ListFilters<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for ListFilters<K> {}

impl<K> ListFilters<K>
where
    K: Ord + Clone + Send + Sync + 'static,
{
    pub fn new(initial: impl IntoIterator<Item = (K, String)>) -> Self {
        Self {
            filters: RwSignal::new(initial.into_iter().collect()),
        }
    }

    pub fn set_filters(&self, values: impl IntoIterator<Item = (K, String)>) {
        self.filters.update(|f| merge_filters(f, values));
    }

    pub fn clear_filters(&self, keys: Option<&[K]>) {
        self.filters.update(|f| clear_filter_values(f, keys));
    }

    /// Значение фильтра (пустая строка, если ключ не задан)
    pub fn value(&self, key: &K) -> String {
        self.filters
            .with(|f| f.get(key).cloned().unwrap_or_default())
    }

    /// Количество непустых фильтров (для бейджа на панели)
    pub fn active_count(&self) -> usize {
        self.filters
            .with(|f| f.values().filter(|v| !v.trim().is_empty()).count())
    }
}
