pub mod filters;
pub mod pagination;
pub mod request_loading;
pub mod selection;
pub mod sort;

pub use filters::ListFilters;
pub use pagination::{PageItem, Pagination, DEFAULT_PAGE_SIZE};
pub use request_loading::RequestLoading;
pub use selection::Selection;
pub use sort::{SortDirection, SortState};
