use crate::ranges::RangeTable;
use crate::store::ResultStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub ranges: Arc<RangeTable>,
    pub store: Arc<Mutex<ResultStore>>,
}

impl AppState {
    pub fn new(ranges: RangeTable, store: ResultStore) -> Self {
        Self {
            ranges: Arc::new(ranges),
            store: Arc::new(Mutex::new(store)),
        }
    }
}
