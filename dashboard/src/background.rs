use std::sync::Arc;

use tracing::info;

use crate::config::{PRUNE_INTERVAL, SESSION_IDLE_TIMEOUT};
use crate::state::AppState;

pub fn spawn_background_workers(state: Arc<AppState>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PRUNE_INTERVAL);
        loop {
            interval.tick().await;

            let (removed, remaining) = {
                let mut sessions = state.sessions.write().unwrap();
                let removed = sessions.prune_idle(SESSION_IDLE_TIMEOUT);
                (removed, sessions.count())
            };

            if removed > 0 {
                info!(removed, remaining, "pruned idle dashboard sessions");
            }
        }
    });
}
