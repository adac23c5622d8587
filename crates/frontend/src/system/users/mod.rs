pub mod error;
pub mod pipeline;
pub mod service;
pub mod store;
pub mod ui;
pub mod utils;
