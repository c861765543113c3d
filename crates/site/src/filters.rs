//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::borrow::Borrow;

use chrono::Datelike;

/// Year range from `since` to the current year, e.g. `2019-2026`.
///
/// Collapses to a single year when `since` is this year or later.
///
/// Usage in templates: `{{ content.founded|year_span }}`
#[askama::filter_fn]
pub fn year_span(
    since: impl Borrow<i32>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(format_span(*since.borrow(), chrono::Utc::now().year()))
}

fn format_span(since: i32, now: i32) -> String {
    if since >= now {
        now.to_string()
    } else {
        format!("{since}-{now}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_span() {
        assert_eq!(format_span(2019, 2026), "2019-2026");
        assert_eq!(format_span(2026, 2026), "2026");
        assert_eq!(format_span(2030, 2026), "2026");
    }
}
