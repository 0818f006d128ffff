use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

static CONTAINER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#main-container").unwrap());
static TITLE_SPAN_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.row > div.col-sm-12 > span.h2").unwrap());

/// Problem title from the page header span, e.g. "A - Frog Jump".
///
/// Only the span's direct text is taken, so the nested "Editorial" link
/// does not leak into the title. Any missing selector step yields `None`;
/// an absent title never aborts the pipeline.
pub fn extract_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let container = doc.select(&CONTAINER_SEL).next()?;
    let span = container.select(&TITLE_SPAN_SEL).next()?;
    direct_text(&span)
}

/// First non-blank text node that is an immediate child of the element.
fn direct_text(el: &ElementRef) -> Option<String> {
    for child in el.children() {
        if let Node::Text(text) = child.value() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editorial_link_excluded() {
        let html = r#"
            <div id="main-container">
              <div class="row">
                <div class="col-sm-12">
                  <span class="h2">A - Frog Jump
                    <a class="btn btn-default" href="/editorial">Editorial</a>
                  </span>
                </div>
              </div>
            </div>"#;
        assert_eq!(extract_title(html).as_deref(), Some("A - Frog Jump"));
    }

    #[test]
    fn missing_container_is_none() {
        assert!(extract_title("<div><span class=\"h2\">X</span></div>").is_none());
    }

    #[test]
    fn missing_span_is_none() {
        let html = r#"<div id="main-container"><div class="row"><div class="col-sm-12"></div></div></div>"#;
        assert!(extract_title(html).is_none());
    }

    #[test]
    fn span_with_only_nested_elements_is_none() {
        let html = r#"
            <div id="main-container">
              <div class="row">
                <div class="col-sm-12">
                  <span class="h2"><a href="/editorial">Editorial</a></span>
                </div>
              </div>
            </div>"#;
        assert!(extract_title(html).is_none());
    }

    #[test]
    fn problem_page_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/problem_a.html").unwrap();
        assert_eq!(extract_title(&html).as_deref(), Some("A - Frog Jump"));
    }
}
