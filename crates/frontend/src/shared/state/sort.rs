use leptos::prelude::*;

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Asc
    }
}

/// Повторный выбор того же ключа меняет направление, новый ключ сбрасывает его в `Asc`
pub fn toggle_sort<K: PartialEq>(
    current: &mut Option<K>,
    direction: &mut SortDirection,
    key: K,
) {
    if current.as_ref() == Some(&key) {
        *direction = direction.toggled();
    } else {
        *current = Some(key);
        *direction = SortDirection::Asc;
    }
}

/// Текущий ключ и направление сортировки списка
pub struct SortState<K: 'static> {
    pub sort_value: RwSignal<Option<K>>,
    pub sort_direction: RwSignal<SortDirection>,
}

impl<K> Clone for SortState<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for SortState<K> {}

impl<K> SortState<K>
where
    K: PartialEq + Clone + Send + Sync + 'static,
{
    pub fn new(default_sort_value: Option<K>) -> Self {
        Self {
            sort_value: RwSignal::new(default_sort_value),
            sort_direction: RwSignal::new(SortDirection::Asc),
        }
    }

    pub fn sort_by(&self, key: K) {
        let mut current = self.sort_value.get_untracked();
        let mut direction = self.sort_direction.get_untracked();
        toggle_sort(&mut current, &mut direction, key);
        self.sort_value.set(current);
        self.sort_direction.set(direction);
    }
}
