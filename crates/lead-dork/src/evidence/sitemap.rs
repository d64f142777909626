//! Sitemap XML extraction.

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

/// `<loc>` and `<lastmod>` values in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapEntries {
    pub locations: Vec<String>,
    pub last_modified: Vec<String>,
}

#[derive(Clone, Copy)]
enum Slot {
    Location,
    LastModified,
}

/// Lenient: a malformed tail keeps every entry read before it.
pub fn parse_sitemap(xml: &str) -> SitemapEntries {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = SitemapEntries::default();
    let mut slot: Option<Slot> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                debug!(
                    position = reader.buffer_position(),
                    error = %err,
                    kept = entries.locations.len(),
                    "sitemap truncated at malformed xml"
                );
                break;
            }
        };
        match event {
            Event::Start(tag) => {
                slot = match tag.local_name().as_ref() {
                    b"loc" => Some(Slot::Location),
                    b"lastmod" => Some(Slot::LastModified),
                    _ => None,
                };
            }
            Event::Text(text) => {
                if let Some(slot) = slot {
                    match text.unescape() {
                        Ok(value) => entries.push(slot, value.trim()),
                        Err(_) => entries.push(slot, String::from_utf8_lossy(&text).trim()),
                    }
                }
            }
            Event::CData(data) => {
                if let Some(slot) = slot {
                    let raw = data.into_inner();
                    entries.push(slot, String::from_utf8_lossy(&raw).trim());
                }
            }
            Event::End(_) => slot = None,
            Event::Eof => break,
            _ => {}
        }
    }

    entries
}

impl SitemapEntries {
    fn push(&mut self, slot: Slot, value: &str) {
        if value.is_empty() {
            return;
        }
        match slot {
            Slot::Location => self.locations.push(value.to_string()),
            Slot::LastModified => self.last_modified.push(value.to_string()),
        }
    }
}
