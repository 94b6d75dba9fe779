use std::sync::RwLock;

use crate::session::{RngSource, SessionRegistry};

pub struct AppState {
    pub sessions: RwLock<SessionRegistry>,
}

impl AppState {
    pub fn new(seed: Option<u64>) -> Self {
        AppState {
            sessions: RwLock::new(SessionRegistry::new(RngSource::from_seed(seed))),
        }
    }
}
