//! Клиентская пагинация: номер страницы, границы среза и окно видимых страниц.
//!
//! Математика вынесена в чистые функции, [`Pagination`] связывает их сигналами.

use leptos::prelude::*;
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Сколько страниц показывается без сокращения
const MAX_PLAIN_PAGES: usize = 7;

/// Элемент строки пагинации
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Количество страниц (0 для пустой коллекции)
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Границы текущей страницы для отображения: (номер первой записи с 1, номер последней записи).
///
/// Для пустой коллекции возвращает `(0, 0)`.
pub fn page_bounds(page: usize, page_size: usize, count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let start = page.saturating_sub(1) * page_size + 1;
    let end = (page * page_size).min(count);
    (start, end)
}

/// Диапазон индексов для среза текущей страницы (страницы нумеруются с 1)
pub fn page_range(page: usize, page_size: usize, count: usize) -> Range<usize> {
    let start = (page.saturating_sub(1) * page_size).min(count);
    let end = (page * page_size).min(count);
    start..end
}

/// Окно видимых страниц с многоточиями
///
/// # Примеры
///
/// ```
/// use frontend::shared::state::pagination::{visible_pages, PageItem};
/// assert_eq!(
///     visible_pages(10, 1),
///     vec![
///         PageItem::Page(1), PageItem::Page(2), PageItem::Page(3),
///         PageItem::Page(4), PageItem::Page(5), PageItem::Ellipsis, PageItem::Page(10),
///     ]
/// );
/// ```
pub fn visible_pages(total: usize, current: usize) -> Vec<PageItem> {
    if total <= MAX_PLAIN_PAGES {
        return (1..=total).map(PageItem::Page).collect();
    }

    let mut pages = Vec::with_capacity(MAX_PLAIN_PAGES);
    if current <= 4 {
        pages.extend((1..=5).map(PageItem::Page));
        pages.push(PageItem::Ellipsis);
        pages.push(PageItem::Page(total));
    } else if current >= total - 3 {
        pages.push(PageItem::Page(1));
        pages.push(PageItem::Ellipsis);
        pages.extend((total - 4..=total).map(PageItem::Page));
    } else {
        pages.push(PageItem::Page(1));
        pages.push(PageItem::Ellipsis);
        pages.extend((current - 1..=current + 1).map(PageItem::Page));
        pages.push(PageItem::Ellipsis);
        pages.push(PageItem::Page(total));
    }
    pages
}

/// Реактивное состояние пагинации поверх счётчика элементов
#[derive(Clone, Copy)]
pub struct Pagination {
    /// Текущая страница (с 1)
    pub current_page: RwSignal<usize>,
    pub page_size: RwSignal<usize>,
    pub total_pages: Memo<usize>,
    pub pagination_start: Memo<usize>,
    pub pagination_end: Memo<usize>,
    pub visible_pages: Memo<Vec<PageItem>>,
}

impl Pagination {
    pub fn new(count: Signal<usize>, initial_page_size: usize) -> Self {
        let current_page = RwSignal::new(1);
        let page_size = RwSignal::new(initial_page_size);

        let total = Memo::new(move |_| total_pages(count.get(), page_size.get()));
        let pagination_start = Memo::new(move |_| {
            page_bounds(current_page.get(), page_size.get(), count.get()).0
        });
        let pagination_end = Memo::new(move |_| {
            page_bounds(current_page.get(), page_size.get(), count.get()).1
        });
        let visible = Memo::new(move |_| visible_pages(total.get(), current_page.get()));

        Self {
            current_page,
            page_size,
            total_pages: total,
            pagination_start,
            pagination_end,
            visible_pages: visible,
        }
    }

    /// Переход на страницу; вне диапазона `[1, total_pages]` ничего не делает
    pub fn go_to_page(&self, page: usize) {
        let total = self.total_pages.get_untracked();
        if page >= 1 && page <= total {
            self.current_page.set(page);
        }
    }

    pub fn handle_page_size_change(&self, size: usize) {
        self.page_size.set(size);
        self.current_page.set(1);
    }

    /// Возврат на первую страницу
    pub fn reset(&self) {
        self.current_page.set(1);
    }

    /// Переносит на последнюю существующую страницу, если коллекция сократилась
    pub fn clamp_to_total(&self) {
        let last = self.total_pages.get_untracked().max(1);
        if self.current_page.get_untracked() > last {
            self.current_page.set(last);
        }
    }
}
