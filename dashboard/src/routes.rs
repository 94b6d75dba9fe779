use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use maud::{Markup, html};
use serde::Serialize;
use uuid::Uuid;

use crate::error::DashboardError;
use crate::preferences::{Theme, client_theme, theme_cookie};
use crate::session::{Session, SessionData, Snapshot};
use crate::state::AppState;
use crate::summary::DashboardMetrics;

#[derive(Serialize)]
pub struct ThemeResponse {
    theme: Theme,
}

/// Flips the client's effective theme and stores the result in its cookie.
pub async fn toggle_theme(headers: HeaderMap) -> impl IntoResponse {
    let theme = client_theme(&headers).toggled();
    (
        [(header::SET_COOKIE, theme_cookie(theme))],
        Json(ThemeResponse { theme }),
    )
}

/// Report export is not implemented; the button only acknowledges the request.
pub async fn export() -> Markup {
    html! {
        p {
            "Export would prepare PDF/CSV reports. "
            "In production this would connect to a reporting backend."
        }
    }
}

#[derive(Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    metrics: DashboardMetrics,
    traffic_trend: f64,
    revenue_trend: f64,
}

fn ready_snapshot(state: &AppState, id: Uuid) -> Result<Arc<Snapshot>, DashboardError> {
    let data = state
        .sessions
        .write()
        .unwrap()
        .data(&id)
        .ok_or(DashboardError::SessionNotFound(id))?;
    match data {
        SessionData::Ready(snapshot) => Ok(snapshot),
        SessionData::Pending => Err(DashboardError::SessionPending(id)),
    }
}

pub async fn session_metrics(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MetricsResponse>, DashboardError> {
    let snapshot = ready_snapshot(&state, id)?;
    let metrics = snapshot.metrics();
    Ok(Json(MetricsResponse {
        traffic_trend: metrics.traffic_trend(),
        revenue_trend: metrics.revenue_trend(),
        metrics,
    }))
}

#[derive(Serialize)]
pub struct SnapshotResponse {
    session_id: Uuid,
    created_at: String,
    snapshot: Arc<Snapshot>,
}

pub async fn session_snapshot(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SnapshotResponse>, DashboardError> {
    let snapshot = ready_snapshot(&state, id)?;
    let created_at = state
        .sessions
        .read()
        .unwrap()
        .get(&id)
        .map(|s: &Session| s.created_at.to_rfc3339())
        .ok_or(DashboardError::SessionNotFound(id))?;

    Ok(Json(SnapshotResponse {
        session_id: id,
        created_at,
        snapshot,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::{HeaderValue, StatusCode};
    use chrono::Local;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(Some(5)))
    }

    async fn toggle(headers: HeaderMap) -> (String, serde_json::Value) {
        let response = toggle_theme(headers).await.into_response();
        let cookie = response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .to_owned();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (cookie, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn toggle_sets_theme_cookie() {
        let (cookie, body) = toggle(HeaderMap::new()).await;
        assert!(cookie.starts_with("theme=dark;"));
        assert_eq!(body["theme"], "dark");

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        let (cookie, body) = toggle(headers).await;
        assert!(cookie.starts_with("theme=light;"));
        assert_eq!(body["theme"], "light");
    }

    #[tokio::test]
    async fn toggle_starts_from_color_scheme_hint() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "sec-ch-prefers-color-scheme",
            HeaderValue::from_static("dark"),
        );
        let (_, body) = toggle(headers).await;
        assert_eq!(body["theme"], "light");
    }

    #[tokio::test]
    async fn metrics_require_ready_session() {
        let state = state();

        let unknown = session_metrics(Path(Uuid::new_v4()), State(Arc::clone(&state)))
            .await
            .err()
            .unwrap();
        assert_eq!(unknown.into_response().status(), StatusCode::NOT_FOUND);

        let id = state.sessions.write().unwrap().create();
        let pending = session_metrics(Path(id), State(Arc::clone(&state)))
            .await
            .err()
            .unwrap();
        assert_eq!(pending.status(), StatusCode::CONFLICT);

        state
            .sessions
            .write()
            .unwrap()
            .ensure_ready(&id, Local::now().naive_local());
        let Json(response) = session_metrics(Path(id), State(state)).await.unwrap();
        assert_eq!(response.metrics.total_revenue, 11060);
        assert_eq!(response.metrics.previous_period_revenue, 9401);
    }

    #[tokio::test]
    async fn snapshot_serializes_all_collections() {
        let state = state();
        let id = state.sessions.write().unwrap().create();
        state
            .sessions
            .write()
            .unwrap()
            .ensure_ready(&id, Local::now().naive_local());

        let Json(response) = session_snapshot(Path(id), State(state)).await.unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["snapshot"]["traffic"].as_array().unwrap().len(), 1680);
        assert_eq!(json["snapshot"]["heatmap"][0]["hour"], "09:00");
        assert_eq!(json["snapshot"]["promotions"][4]["revenue"], 890);
    }
}
