use std::sync::Arc;

use savetips_common::RandomSource;

use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub random: Arc<dyn RandomSource>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self {
            random,
            metrics: Arc::new(Metrics::default()),
        }
    }
}
