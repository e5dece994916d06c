//! RSS feed parsing shared by search-based sources.
//!
//! Hand-rolled `quick-xml` reader: extracts `<item>` elements, pulling
//! `<title>`, `<link>`, `<description>`, `<pubDate>`, and `<source>` fields.
//! HTML in descriptions is stripped and whitespace normalized.

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::NewsError;
use crate::types::RawItem;

/// Parse an RSS XML feed into [`RawItem`]s.
///
/// Items without both a title and a link are skipped. Stops after
/// `max_items` have been collected. Unparsable `pubDate` values yield
/// `published_at: None` rather than an error.
pub(crate) fn parse_rss_feed(xml: &str, max_items: usize) -> Result<Vec<RawItem>, NewsError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut in_item = false;
    let mut in_description = false;
    let mut current_tag = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut description = String::new();
    let mut pub_date = String::new();
    let mut publisher = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("").to_string();
                if name == "item" {
                    in_item = true;
                    in_description = false;
                    title.clear();
                    link.clear();
                    description.clear();
                    pub_date.clear();
                    publisher.clear();
                } else if name == "description" && in_item {
                    in_description = true;
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("");
                if name == "description" {
                    in_description = false;
                }
                if name == "item" && in_item {
                    in_item = false;
                    if !title.is_empty() && !link.is_empty() {
                        items.push(RawItem {
                            title: title.clone(),
                            link: link.clone(),
                            snippet: description.clone(),
                            publisher: if publisher.is_empty() {
                                None
                            } else {
                                Some(publisher.clone())
                            },
                            published_at: parse_pub_date(&pub_date),
                        });
                        if items.len() >= max_items {
                            break;
                        }
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    if in_description {
                        // Accumulate all text nodes inside <description>,
                        // including those emitted after nested tags like <b>.
                        if !description.is_empty() {
                            description.push(' ');
                        }
                        description.push_str(&strip_html(&text));
                    } else {
                        match current_tag.as_str() {
                            "title" => title = text,
                            "link" => link = text,
                            "pubDate" => pub_date = text,
                            "source" => publisher = text,
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_item && in_description {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    description = strip_html(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(NewsError::UpstreamFetch(format!("RSS parse error: {e}"))),
            _ => {}
        }
    }

    Ok(items)
}

/// Parse an RFC 2822 `pubDate` value, returning `None` when unparsable.
fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Strip HTML tags from a string and normalize whitespace.
pub(crate) fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
