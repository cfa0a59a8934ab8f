pub mod app;
pub mod credentials;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod navigator;
pub mod session;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use errors::{AppError, TrackerError};
pub use navigator::DateNavigator;
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore, resolve_data_path};
pub use tracker::Tracker;
