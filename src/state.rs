use crate::models::LogMap;
use crate::photos::PhotoStore;
use crate::storage::RecordStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub records: RecordStore,
    pub data: Arc<Mutex<LogMap>>,
    pub photos: Arc<PhotoStore>,
}

impl AppState {
    pub fn new(records: RecordStore, data: LogMap, photos: PhotoStore) -> Self {
        Self {
            records,
            data: Arc::new(Mutex::new(data)),
            photos: Arc::new(photos),
        }
    }
}
