//! Text helpers over parsed HTML documents.

use scraper::{ElementRef, Html, Selector};

const HIDDEN_TEXT_PARENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Concatenated text nodes, skipping scripts and styles.
pub fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_TEXT_PARENTS.contains(&element.name()))
        });
        if !hidden {
            out.push_str(text);
            out.push(' ');
        }
    }
    out
}

pub fn text_content(elem: ElementRef<'_>) -> String {
    elem.text().collect::<Vec<_>>().join(" ")
}

pub fn compact_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Elements matching a CSS selector; an invalid selector matches nothing.
pub fn select<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// `content` attribute of the first `<meta>` whose `attr` equals `value`.
pub fn meta_content(document: &Html, attr: &str, value: &str) -> Option<String> {
    select(document, "meta").into_iter().find_map(|meta| {
        let element = meta.value();
        let matches = element
            .attr(attr)
            .is_some_and(|found| found.eq_ignore_ascii_case(value));
        matches.then(|| element.attr("content").unwrap_or_default().to_string())
    })
}

/// Keep the first occurrence of each value.
pub fn dedupe(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
