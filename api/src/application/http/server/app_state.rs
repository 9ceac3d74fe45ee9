use std::sync::Arc;

use snapchef_core::application::SnapchefService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: SnapchefService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: SnapchefService) -> Self {
        Self { args, service }
    }
}
