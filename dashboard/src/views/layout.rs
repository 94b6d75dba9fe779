use chrono::NaiveDateTime;
use maud::{Markup, html};
use uuid::Uuid;

use crate::styles::Layout;
use crate::view_state::{DateRangePreset, LocationFilter, PromotionFilter, Section, ViewState};

use super::{THEME_TOGGLE_ID, content_url};

pub fn sidebar(session: Uuid, view: &ViewState) -> Markup {
    html! {
        nav.(Layout::SIDEBAR) {
            div.(Layout::BRAND) { "Restaurant Analytics" }
            @for section in Section::ALL {
                button
                    .(Layout::NAV_LINK)
                    .(if section == view.section { Layout::NAV_ACTIVE } else { "" })
                    hx-get=(content_url(session, &view.with_section(section)))
                    hx-target="#dashboard-content"
                    hx-swap="innerHTML"
                {
                    (section.nav_label())
                }
            }
            button #(THEME_TOGGLE_ID) .(Layout::THEME_TOGGLE)
                hx-post="/theme/toggle"
                hx-swap="none"
            {
                "Toggle theme"
            }
        }
    }
}

pub fn toolbar(session: Uuid, view: &ViewState) -> Markup {
    html! {
        div.(Layout::TOOLBAR) {
            @for preset in DateRangePreset::ALL {
                button
                    .(Layout::RANGE_BTN)
                    .(if preset == view.range { Layout::RANGE_ACTIVE } else { "" })
                    hx-get=(content_url(session, &view.with_range(preset)))
                    hx-target="#dashboard-content"
                    hx-swap="innerHTML"
                {
                    (preset.menu_label())
                }
            }
            form.(Layout::FILTERS)
                hx-get=(format!("/fragments/session/{session}/content"))
                hx-trigger="change"
                hx-target="#dashboard-content"
                hx-swap="innerHTML"
            {
                input type="hidden" name="section" value=(view.section.key());
                input type="hidden" name="range" value=(view.range.key());
                select.(Layout::FILTER_SELECT) name="location" {
                    @for location in LocationFilter::ALL {
                        option value=(location.key()) selected[location == view.location] {
                            (location.label())
                        }
                    }
                }
                select.(Layout::FILTER_SELECT) name="promotion" {
                    @for promotion in PromotionFilter::ALL {
                        option value=(promotion.key()) selected[promotion == view.promotion] {
                            (promotion.label())
                        }
                    }
                }
            }
            button.(Layout::EXPORT_BTN) hx-post="/export" hx-target="#notice" hx-swap="innerHTML" {
                "Export"
            }
        }
    }
}

pub fn page_header(view: &ViewState, now: NaiveDateTime) -> Markup {
    let range = view.range.resolve(now);
    let filters = view.active_filters();

    html! {
        div.(Layout::PAGE_HEADER) {
            h1 { (view.section.title()) }
            p.(Layout::SUBTITLE) { "Track your restaurant business performance in real-time" }
            p.(Layout::RANGE_NOTE) {
                (range.label) ": "
                (range.start.format("%b %-d").to_string())
                " to "
                (range.end.format("%b %-d, %Y").to_string())
            }
            @if !filters.is_empty() {
                div.(Layout::FILTER_BANNER) {
                    strong { "Active Filters: " }
                    (filters.join(" • "))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn sidebar_links_keep_other_state() {
        let view = ViewState::default().with_location(LocationFilter::Patio);
        let markup = sidebar(Uuid::nil(), &view).into_string();
        assert!(markup.contains("section=engagement&amp;range=7days&amp;location=patio"));
        assert!(markup.contains(Layout::NAV_ACTIVE));
    }

    #[test]
    fn toolbar_selects_current_filters() {
        let view = ViewState::default().with_promotion(PromotionFilter::Pizza);
        let markup = toolbar(Uuid::nil(), &view).into_string();
        assert!(markup.contains(r#"<option value="pizza" selected>"#));
        assert!(markup.contains(r#"<option value="all" selected>"#));
    }

    #[test]
    fn header_shows_range_and_filters() {
        let view = ViewState::default().with_location(LocationFilter::BarArea);
        let markup = page_header(&view, now()).into_string();
        assert!(markup.contains("Last 7 Days: Feb 24 to Mar 1, 2024"));
        assert!(markup.contains("Location: Bar Area"));

        let plain = page_header(&ViewState::default(), now()).into_string();
        assert!(!plain.contains("Active Filters"));
    }
}
