use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("session {0} not found")]
    SessionNotFound(Uuid),
    #[error("session {0} has not generated its data yet")]
    SessionPending(Uuid),
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::SessionPending(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, "{self}");
        (status, self.to_string()).into_response()
    }
}
