use std::sync::Arc;

use crate::config::EngineConfig;
use crate::fetch::SheetSource;
use crate::models::Dataset;

/// Shared server state. The dataset is replaced wholesale on refresh;
/// every request recomputes its view from the snapshot it reads.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<tokio::sync::RwLock<Dataset>>,
    pub engine: EngineConfig,
    pub source: Arc<SheetSource>,
}

impl AppState {
    pub fn new(dataset: Dataset, engine: EngineConfig, source: SheetSource) -> Self {
        Self {
            dataset: Arc::new(tokio::sync::RwLock::new(dataset)),
            engine,
            source: Arc::new(source),
        }
    }
}
