use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use scraper::{Html, Selector};

use crate::cache::ContestRecord;

// Problem pages carry the contest title in the navbar link; the contest top
// page uses a page-level <h1> instead. First non-empty match wins.
static TITLE_SELS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    vec![
        Selector::parse("a.contest-title").unwrap(),
        Selector::parse("#main-container h1").unwrap(),
    ]
});

static TIME_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#contest-nav-tabs > div > small.contest-duration > a:nth-child(1) > time")
        .unwrap()
});

/// Contest-level metadata from a problem page or the contest top page.
/// Title, raw start time, and normalized date are each independently
/// optional; nothing here fails on a miss.
pub fn extract_contest_meta(html: &str, url: &str) -> ContestRecord {
    let doc = Html::parse_document(html);

    let title = TITLE_SELS.iter().find_map(|sel| {
        let text: String = doc.select(sel).next()?.text().collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    });

    let start_time_raw = doc
        .select(&TIME_SEL)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty());

    let date = start_time_raw.as_deref().map(normalize_date);

    ContestRecord {
        url: url.to_string(),
        title,
        start_time_raw,
        date,
    }
}

/// Best-effort `YYYY-MM-DD` from the raw start time, e.g.
/// "2025-12-27 21:00:00+0900". Tries the timezone-qualified layout first,
/// then without timezone, then date-only; an unparseable string degrades
/// to its first 10 characters instead of failing.
pub fn normalize_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%z") {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%Y-%m-%d").to_string();
    }
    raw.chars().take(10).collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_with_timezone() {
        assert_eq!(normalize_date("2025-12-27 21:00:00+0900"), "2025-12-27");
    }

    #[test]
    fn normalize_without_timezone() {
        assert_eq!(normalize_date("2025-12-27 21:00:00"), "2025-12-27");
    }

    #[test]
    fn normalize_date_only() {
        assert_eq!(normalize_date("2025-12-27"), "2025-12-27");
    }

    #[test]
    fn normalize_falls_back_to_prefix() {
        // exactly the first 10 characters, counted by char
        assert_eq!(normalize_date("2025年12月27日 21時"), "2025年12月27");
        assert_eq!(normalize_date("soon"), "soon");
    }

    #[test]
    fn title_from_navbar_link() {
        let html = r#"<a class="contest-title" href="/contests/abc421">AtCoder Beginner Contest 421</a>"#;
        let meta = extract_contest_meta(html, "https://atcoder.jp/contests/abc421");
        assert_eq!(meta.title.as_deref(), Some("AtCoder Beginner Contest 421"));
        assert!(meta.start_time_raw.is_none());
        assert!(meta.date.is_none());
    }

    #[test]
    fn title_falls_back_to_h1() {
        let html = r#"<div id="main-container"><h1>AtCoder Beginner Contest 421</h1></div>"#;
        let meta = extract_contest_meta(html, "https://atcoder.jp/contests/abc421");
        assert_eq!(meta.title.as_deref(), Some("AtCoder Beginner Contest 421"));
    }

    #[test]
    fn navbar_link_wins_over_h1() {
        let html = r#"
            <a class="contest-title" href="/contests/abc421">From Navbar</a>
            <div id="main-container"><h1>From H1</h1></div>"#;
        let meta = extract_contest_meta(html, "https://atcoder.jp/contests/abc421");
        assert_eq!(meta.title.as_deref(), Some("From Navbar"));
    }

    #[test]
    fn all_fields_absent_is_fine() {
        let meta = extract_contest_meta("<html></html>", "https://atcoder.jp/contests/abc421");
        assert_eq!(meta.url, "https://atcoder.jp/contests/abc421");
        assert!(meta.title.is_none());
        assert!(meta.start_time_raw.is_none());
        assert!(meta.date.is_none());
    }

    #[test]
    fn contest_top_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/contest_top.html").unwrap();
        let meta = extract_contest_meta(&html, "https://atcoder.jp/contests/abc421");
        assert_eq!(meta.title.as_deref(), Some("AtCoder Beginner Contest 421"));
        assert_eq!(
            meta.start_time_raw.as_deref(),
            Some("2025-12-27 21:00:00+0900")
        );
        assert_eq!(meta.date.as_deref(), Some("2025-12-27"));
    }

    #[test]
    fn problem_page_fixture_uses_navbar_title() {
        let html = std::fs::read_to_string("tests/fixtures/problem_a.html").unwrap();
        let meta =
            extract_contest_meta(&html, "https://atcoder.jp/contests/abc421/tasks/abc421_a");
        assert_eq!(meta.title.as_deref(), Some("AtCoder Beginner Contest 421"));
        assert_eq!(meta.date.as_deref(), Some("2025-12-27"));
    }
}
