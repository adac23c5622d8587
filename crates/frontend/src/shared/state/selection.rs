//! Отметка строк списка чекбоксами.
//!
//! Выбор хранится как список ключей, ключ извлекается из элемента функцией `key_of`.

use leptos::prelude::*;

/// Выбраны ли все элементы (для пустого списка всегда `false`)
pub fn is_all_selected<T, K: PartialEq>(items: &[T], checked: &[K], key_of: fn(&T) -> K) -> bool {
    if items.is_empty() {
        return false;
    }
    items.iter().all(|item| checked.contains(&key_of(item)))
}

/// Добавить ключ, если его нет, иначе убрать
pub fn toggle_item<K: PartialEq>(checked: &mut Vec<K>, key: K) {
    if let Some(index) = checked.iter().position(|k| *k == key) {
        checked.remove(index);
    } else {
        checked.push(key);
    }
}

/// Снять всё, если выбраны все элементы, иначе добавить недостающие ключи
pub fn toggle_all<T, K: PartialEq>(items: &[T], checked: &mut Vec<K>, key_of: fn(&T) -> K) {
    if is_all_selected(items, checked, key_of) {
        checked.clear();
        return;
    }
    for item in items {
        let key = key_of(item);
        if !checked.contains(&key) {
            checked.push(key);
        }
    }
}

pub struct Selection<T, K>
where
    T: Send + Sync + 'static,
    K: Send + Sync + 'static,
{
    pub checked_items: RwSignal<Vec<K>>,
    pub is_all_selected: Memo<bool>,
    items: Signal<Vec<T>>,
    key_of: fn(&T) -> K,
}

impl<T, K> Clone for Selection<T, K>
where
    T: Send + Sync + 'static,
    K: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, K> Copy for Selection<T, K>
where
    T: Send + Sync + 'static,
    K: Send + Sync + 'static,
{
}

impl<T, K> Selection<T, K>
where
    T: Send + Sync + 'static,
    K: PartialEq + Clone + Send + Sync + 'static,
{
    pub fn new(items: Signal<Vec<T>>, key_of: fn(&T) -> K) -> Self {
        let checked_items = RwSignal::new(Vec::new());
        let all = Memo::new(move |_| {
            items.with(|items| checked_items.with(|checked| is_all_selected(items, checked, key_of)))
        });

        Self {
            checked_items,
            is_all_selected: all,
            items,
            key_of,
        }
    }

    pub fn toggle_select_item(&self, key: K) {
        self.checked_items.update(|checked| toggle_item(checked, key));
    }

    pub fn toggle_select_all(&self) {
        let key_of = self.key_of;
        self.items.with_untracked(|items| {
            self.checked_items
                .update(|checked| toggle_all(items, checked, key_of));
        });
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.checked_items.with(|checked| checked.contains(key))
    }

    /// Убрать ключи (например, после удаления записей)
    pub fn remove_keys(&self, keys: &[K]) {
        self.checked_items
            .update(|checked| checked.retain(|k| !keys.contains(k)));
    }

    /// Оставить только ключи из `keys` (например, после смены фильтров)
    pub fn retain_keys(&self, keys: &[K]) {
        self.checked_items
            .update(|checked| checked.retain(|k| keys.contains(k)));
    }

    pub fn clear(&self) {
        self.checked_items.set(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
    }

    fn row_id(row: &Row) -> u32 {
        row.id
    }

    fn rows(ids: &[u32]) -> Vec<Row> {
        ids.iter().map(|&id| Row { id }).collect()
    }

    #[test]
    fn test_empty_list_is_never_all_selected() {
        let items: Vec<Row> = Vec::new();
        assert!(!is_all_selected(&items, &[1, 2], row_id));
    }

    #[test]
    fn test_toggle_one_after_select_all() {
        let items = rows(&[1, 2, 3]);
        let mut checked = Vec::new();

        toggle_all(&items, &mut checked, row_id);
        assert!(is_all_selected(&items, &checked, row_id));

        toggle_item(&mut checked, 2);
        assert!(!is_all_selected(&items, &checked, row_id));

        toggle_item(&mut checked, 2);
        assert!(is_all_selected(&items, &checked, row_id));
    }

    #[test]
    fn test_toggle_all_adds_only_missing_keys() {
        let items = rows(&[1, 2, 3]);
        let mut checked = vec![2, 7];

        toggle_all(&items, &mut checked, row_id);
        assert_eq!(checked, vec![2, 7, 1, 3]);

        toggle_all(&items, &mut checked, row_id);
        assert!(checked.is_empty());
    }

    #[test]
    fn test_selection_signals() {
        let owner = Owner::new();
        owner.set();

        let items = RwSignal::new(rows(&[10, 20]));
        let selection = Selection::new(Signal::derive(move || items.get()), row_id);

        assert!(!selection.is_all_selected.get());
        selection.toggle_select_all();
        assert!(selection.is_all_selected.get());
        assert!(selection.is_selected(&20));

        items.update(|items| items.push(Row { id: 30 }));
        assert!(!selection.is_all_selected.get());

        selection.toggle_select_all();
        assert_eq!(selection.checked_items.get(), vec![10, 20, 30]);

        selection.remove_keys(&[10]);
        assert_eq!(selection.checked_items.get(), vec![20, 30]);

        selection.toggle_select_item(20);
        assert_eq!(selection.checked_items.get(), vec![30]);

        selection.toggle_select_item(10);
        selection.retain_keys(&[10, 40]);
        assert_eq!(selection.checked_items.get(), vec![10]);

        selection.clear();
        assert!(selection.checked_items.get().is_empty());
    }
}
