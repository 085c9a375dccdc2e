use crate::config::AppConfig;
use crate::services::dialogue::DialogueEngine;
use crate::services::messaging::MessagingProvider;

pub struct AppState {
    pub config: AppConfig,
    pub engine: DialogueEngine,
    pub messaging: Box<dyn MessagingProvider>,
}
