use std::sync::Arc;

use crate::config::Config;
use crate::db::SubmissionStore;
use crate::email::Notifier;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn SubmissionStore>,
    pub notifier: Arc<dyn Notifier>,
}
