pub mod app;
pub mod date;
pub mod errors;
pub mod handlers;
pub mod journal;
pub mod models;
pub mod photos;
pub mod state;
pub mod storage;

pub use app::router;
pub use photos::{PhotoStore, resolve_photo_dir};
pub use state::AppState;
pub use storage::{RecordStore, resolve_data_path};
