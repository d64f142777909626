use crate::evidence::html::{compact_ws, meta_content, select, text_content};
use crate::workflows::request::{normalize_target, require, TargetRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use scraper::Html;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub og_data: BTreeMap<String, String>,
    pub twitter_data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataReport {
    pub url: String,
    pub metadata: PageMetadata,
}

impl IntelService {
    pub async fn extract_metadata(&self, request: TargetRequest) -> Result<MetadataReport, IntelError> {
        let target = normalize_target(&require(request.url.as_deref(), "url")?)?;
        let page = self
            .fetch_primary("Metadata extraction", &target, timeouts::METADATA)
            .await?;

        Ok(MetadataReport {
            url: target.to_string(),
            metadata: read_metadata(&page.body),
        })
    }
}

fn read_metadata(body: &str) -> PageMetadata {
    let document = Html::parse_document(body);

    let title = select(&document, "title")
        .into_iter()
        .next()
        .map(|title| compact_ws(&text_content(title)))
        .unwrap_or_default();

    PageMetadata {
        title,
        description: meta_content(&document, "name", "description").unwrap_or_default(),
        keywords: meta_content(&document, "name", "keywords").unwrap_or_default(),
        og_data: prefixed(&document, r#"meta[property^="og:"]"#, "property"),
        twitter_data: prefixed(&document, r#"meta[name^="twitter:"]"#, "name"),
    }
}

/// `attr` value to `content` for every matching `<meta>`; later tags win.
fn prefixed(document: &Html, css: &str, attr: &str) -> BTreeMap<String, String> {
    select(document, css)
        .into_iter()
        .filter_map(|meta| {
            let element = meta.value();
            let key = element.attr(attr)?;
            Some((key.to_string(), element.attr("content").unwrap_or_default().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_graph_and_twitter_tags_are_collected() {
        let body = r#"<html><head>
            <title> Acme
              Widgets </title>
            <meta name="description" content="Widgets for teams">
            <meta property="og:title" content="Acme">
            <meta property="og:image" content="https://acme.io/og.png">
            <meta name="twitter:card" content="summary">
        </head><body></body></html>"#;

        let metadata = read_metadata(body);
        assert_eq!(metadata.title, "Acme Widgets");
        assert_eq!(metadata.description, "Widgets for teams");
        assert_eq!(metadata.keywords, "");
        assert_eq!(metadata.og_data.len(), 2);
        assert_eq!(metadata.og_data["og:title"], "Acme");
        assert_eq!(metadata.twitter_data["twitter:card"], "summary");
    }
}
