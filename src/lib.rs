pub mod app;
pub mod cards;
pub mod classify;
pub mod config;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod ranges;
pub mod state;
pub mod store;
pub mod trend;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use ranges::RangeTable;
pub use state::AppState;
pub use store::ResultStore;
