//! Shared class names; the rules live in `assets/main.css`.

pub const PANEL: &str = "panel";
pub const PANEL_HIGHLIGHT: &str = "panel panel-highlight";
pub const TABLE_CONTAINER: &str = "table-container";
pub const TABLE: &str = "table";
pub const LABEL: &str = "label";
pub const INPUT: &str = "input";
pub const TEXT_MUTED: &str = "text-muted";
pub const NOTICE_WARNING: &str = "notice notice-warning";
pub const NOTICE_ERROR: &str = "notice notice-error";

pub const BTN_PRIMARY: &str = "btn btn-primary";
pub const BTN_SECONDARY: &str = "btn btn-secondary";

pub fn btn_small(active: bool) -> &'static str {
    if active {
        "btn btn-small btn-active"
    } else {
        "btn btn-small"
    }
}

pub fn nav_link(active: bool) -> &'static str {
    if active {
        "nav-link nav-link-active"
    } else {
        "nav-link"
    }
}

/// Price cell class; best prices for a good are highlighted.
pub fn price_cell(best: bool) -> &'static str {
    if best {
        "num best-price"
    } else {
        "num"
    }
}

pub fn margin_class(margin: i64) -> &'static str {
    if margin > 0 {
        "margin-positive"
    } else if margin < 0 {
        "margin-negative"
    } else {
        "text-muted"
    }
}
