use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::cache::SamplePair;

static PART_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.part").unwrap());
static H3_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());
static PRE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("pre").unwrap());

const INPUT_MARKER: &str = "入力例";
const OUTPUT_MARKER: &str = "出力例";

/// Pull the ordered sample pairs out of a problem page.
///
/// The statement is a flat run of `div.part` blocks. A two-element sliding
/// window pairs each 入力例 block with the 出力例 block that immediately
/// follows it; on a match both blocks are consumed, otherwise the window
/// advances by one so unrelated blocks (constraints, notes) in between do
/// not derail the scan. Zero matches is a legitimate empty result.
pub fn extract_samples(html: &str) -> Vec<SamplePair> {
    let doc = Html::parse_document(html);
    let parts: Vec<ElementRef> = doc.select(&PART_SEL).collect();

    let mut samples = Vec::new();
    let mut i = 0;
    while i < parts.len() {
        if let Some(input) = labeled_pre(&parts[i], INPUT_MARKER) {
            let output = parts
                .get(i + 1)
                .and_then(|part| labeled_pre(part, OUTPUT_MARKER));
            if let Some(output) = output {
                samples.push(SamplePair { input, output });
                i += 2;
                continue;
            }
        }
        i += 1;
    }
    samples
}

/// Body of the part's `<pre>` if its `<h3>` heading contains `marker`,
/// carriage returns stripped.
fn labeled_pre(part: &ElementRef, marker: &str) -> Option<String> {
    let heading: String = part.select(&H3_SEL).next()?.text().collect();
    if !heading.contains(marker) {
        return None;
    }
    let body: String = part.select(&PRE_SEL).next()?.text().collect();
    Some(body.replace('\r', ""))
}

// ── Tests ──
