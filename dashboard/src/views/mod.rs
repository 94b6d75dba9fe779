pub mod components;
pub mod layout;
pub mod sections;

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use axum::response::IntoResponse;
use chrono::Local;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use uuid::Uuid;

use crate::error::DashboardError;
use crate::preferences::{Theme, client_theme};
use crate::session::Snapshot;
use crate::state::AppState;
use crate::styles::{self, Global, Layout};
use crate::view_state::{Section, ViewQuery, ViewState};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";

pub const THEME_TOGGLE_ID: &str = "theme-toggle";

/// Applies the theme returned by `/theme/toggle` to the root element.
fn theme_script() -> String {
    format!(
        "document.addEventListener('htmx:afterRequest', (e) => {{\
            if (e.detail.elt.id !== '{THEME_TOGGLE_ID}' || !e.detail.successful) return;\
            const theme = JSON.parse(e.detail.xhr.responseText).theme;\
            document.documentElement.classList.toggle('{}', theme === 'dark');\
        }});",
        Global::DARK
    )
}

pub fn content_url(session: Uuid, view: &ViewState) -> String {
    format!(
        "/fragments/session/{session}/content?{}",
        view.query_string()
    )
}

/// Full HTML document. The dark class marker goes on the root element.
pub fn page_shell(title: &str, theme: Theme, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class=[theme.is_dark().then_some(Global::DARK)] {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/styles.css";
                script src=(HTMX_SRC) {}
                script { (PreEscaped(theme_script())) }
            }
            body {
                (content)
            }
        }
    }
}

/// Opens a new session and serves the loading shell. Data generation waits
/// for the browser to request the content fragment.
pub async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    let session = state.sessions.write().unwrap().create();
    let theme = client_theme(&headers);

    let content = html! {
        div #dashboard-content
            hx-get=(content_url(session, &ViewState::default()))
            hx-trigger="load"
            hx-swap="innerHTML"
        {
            div.(Global::LOADING) {
                div.(Global::SPINNER) {}
                p { "Loading dashboard..." }
            }
        }
    };

    (
        [(
            HeaderName::from_static("accept-ch"),
            HeaderValue::from_static("Sec-CH-Prefers-Color-Scheme"),
        )],
        page_shell("Restaurant Analytics", theme, content),
    )
}

pub async fn dashboard_content(
    Path(id): Path<Uuid>,
    Query(query): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Markup, DashboardError> {
    let snapshot = state
        .sessions
        .write()
        .unwrap()
        .ensure_ready(&id, Local::now().naive_local())
        .ok_or(DashboardError::SessionNotFound(id))?;
    let view = ViewState::from(query);
    Ok(render_dashboard(id, &view, &snapshot))
}

pub fn render_dashboard(session: Uuid, view: &ViewState, snapshot: &Snapshot) -> Markup {
    let body = match view.section {
        Section::Overview => sections::overview(snapshot),
        Section::Traffic => sections::traffic(snapshot),
        Section::Engagement => sections::engagement(snapshot),
        Section::Promotions => sections::promotions(snapshot),
    };

    html! {
        div.(Layout::SHELL) {
            (layout::sidebar(session, view))
            main.(Layout::MAIN) {
                (layout::toolbar(session, view))
                div #notice .(Layout::NOTICE) {}
                div.(Layout::CONTENT) {
                    (layout::page_header(view, snapshot.generated_at))
                    (body)
                }
            }
        }
    }
}

pub async fn styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], styles::ALL.as_str())
}
