//! Per-client display preferences, kept in the browser as cookies.

use axum::http::{HeaderMap, header};
use serde::Serialize;

/// Cookie holding the client's chosen theme.
pub const THEME_COOKIE: &str = "theme";
/// Client hint carrying the browser's colour scheme, e.g. `"dark"`.
pub const PREFERS_COLOR_SCHEME: &str = "sec-ch-prefers-color-scheme";

const THEME_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

/// Stored theme, else the client's system preference, else light.
pub fn resolve_theme(stored: Option<Theme>, system_prefers_dark: Option<bool>) -> Theme {
    match (stored, system_prefers_dark) {
        (Some(theme), _) => theme,
        (None, Some(true)) => Theme::Dark,
        _ => Theme::Light,
    }
}

/// The theme saved in the request's `theme` cookie, if any.
///
/// Unrecognised values are treated as unset.
pub fn stored_theme(headers: &HeaderMap) -> Option<Theme> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == THEME_COOKIE)
        .and_then(|(_, value)| Theme::parse(value))
}

pub fn system_prefers_dark(headers: &HeaderMap) -> Option<bool> {
    let value = headers.get(PREFERS_COLOR_SCHEME)?.to_str().ok()?;
    match value.trim().trim_matches('"') {
        "dark" => Some(true),
        "light" => Some(false),
        _ => None,
    }
}

/// Effective theme for the requesting client.
pub fn client_theme(headers: &HeaderMap) -> Theme {
    resolve_theme(stored_theme(headers), system_prefers_dark(headers))
}

/// `Set-Cookie` value that stores `theme` for a year.
pub fn theme_cookie(theme: Theme) -> String {
    format!(
        "{THEME_COOKIE}={}; Path=/; Max-Age={THEME_COOKIE_MAX_AGE_SECS}; SameSite=Lax",
        theme.as_str()
    )
}
