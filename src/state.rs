use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::ai::FlowService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub flows: Arc<FlowService>,
}
