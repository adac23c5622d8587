pub mod date_input;
pub mod filter_panel;
pub mod pagination_controls;
pub mod table;

pub use date_input::DateInput;
pub use filter_panel::{FilterPanel, FilterTag};
pub use pagination_controls::PaginationControls;
