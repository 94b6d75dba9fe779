mod global {
    turf::style_sheet!("assets/global.css");
}

mod layout {
    turf::style_sheet!("assets/layout.css");
}

mod charts {
    turf::style_sheet!("assets/charts.css");
}

mod heatmap {
    turf::style_sheet!("assets/heatmap.css");
}

pub use charts::ClassName as Charts;
pub use global::ClassName as Global;
pub use heatmap::ClassName as Heatmap;
pub use layout::ClassName as Layout;

use std::sync::LazyLock;

pub static ALL: LazyLock<String> = LazyLock::new(|| {
    [
        global::STYLE_SHEET,
        layout::STYLE_SHEET,
        charts::STYLE_SHEET,
        heatmap::STYLE_SHEET,
    ]
    .join("\n")
});
