//! restobrowse TUI - terminal front end for the restaurant API
//!
//! Two screens share one status bar:
//! - List: paginated results, name/nearby/image search, filters
//! - Detail: a single restaurant, fetched fresh on every visit
//!
//! Network calls run on a worker thread; the main thread owns all state.

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use theme::Theme;
