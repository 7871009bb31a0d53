//! MODS source-document parsing.
//!
//! Streaming reader over the XML, collecting the three things a synthesized
//! descriptor needs: an issue date, a version identifier, and categorized
//! resource URLs. Tag matching is namespace-stripped and case-insensitive —
//! upstream documents mix `mods:dateIssued`, `dateIssued`, and plain `date`.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date regex"));
static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(1[6-9]\d{2}|20\d{2})\b").expect("year regex"));
/// Canonical bill-version identifiers look like `hr85ih` or `s2043enr`.
static BILL_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{1,7}\d+[a-z]+\d*$").expect("version-id regex"));

/// What a MODS document contributes to a synthesized descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModsRecord {
    /// Issue date: `YYYY-MM-DD` when one was found, a bare year, or the raw
    /// element text verbatim.
    pub issued: Option<String>,
    pub version_id: Option<String>,
    /// Resource-kind (`pdf` / `xml` / `html` / `unknown`*n*) → URL.
    pub urls: BTreeMap<String, String>,
}

/// Parse a MODS document.
///
/// Returns `Err` only when the XML itself is unreadable; a document that
/// simply lacks the interesting elements parses to an empty record.
pub fn parse_mods(xml: &str) -> Result<ModsRecord, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut collector = Collector::default();

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => collector.on_start(&e),
            Event::End(_) => collector.on_end(),
            Event::Text(t) => {
                let text = t.unescape()?.trim().to_string();
                collector.on_text(text);
            }
            Event::CData(t) => {
                let text = String::from_utf8_lossy(&t.into_inner()).trim().to_string();
                collector.on_text(text);
            }
            _ => {}
        }
    }

    Ok(collector.finish())
}

/// Streaming accumulator over the document's elements.
#[derive(Default)]
struct Collector {
    /// Lowercased, namespace-stripped element stack.
    stack: Vec<String>,
    /// `type` attribute of the currently open `identifier` element.
    identifier_type: Option<String>,
    identifiers: Vec<(Option<String>, String)>,
    date_text: Option<String>,
    raw_urls: Vec<String>,
    all_text: String,
}

impl Collector {
    fn on_start(&mut self, e: &BytesStart) {
        let name = local_name(e);
        if name == "identifier" {
            self.identifier_type = type_attribute(e);
        }
        self.stack.push(name);
    }

    fn on_end(&mut self) {
        if self.stack.pop().as_deref() == Some("identifier") {
            self.identifier_type = None;
        }
    }

    fn on_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        self.all_text.push(' ');
        self.all_text.push_str(&text);

        match self.stack.last().map(String::as_str) {
            Some("dateissued" | "datecreated" | "date") => {
                // First non-empty date element in document order wins.
                if self.date_text.is_none() {
                    self.date_text = Some(text);
                }
            }
            Some("identifier") => {
                let kind = self.identifier_type.clone();
                self.identifiers.push((kind, text));
            }
            // Covers both bare <url> elements and <url> children of <location>.
            Some("url") => self.raw_urls.push(text),
            _ => {}
        }
    }

    fn finish(self) -> ModsRecord {
        let issued = self
            .date_text
            .as_deref()
            .map(date_token)
            .or_else(|| scan_for_date(&self.all_text));

        ModsRecord {
            issued,
            version_id: pick_version_id(&self.identifiers),
            urls: categorize_urls(self.raw_urls),
        }
    }
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().local_name().as_ref()).to_ascii_lowercase()
}

fn type_attribute(e: &BytesStart) -> Option<String> {
    e.try_get_attribute("type")
        .ok()
        .flatten()
        .map(|attr| String::from_utf8_lossy(&attr.value).to_ascii_lowercase())
}

/// `YYYY-MM-DD` if present, else a bare 4-digit year, else the text verbatim.
fn date_token(text: &str) -> String {
    if let Some(m) = DATE_RE.find(text) {
        return m.as_str().to_string();
    }
    if let Some(m) = YEAR_RE.find(text) {
        return m.as_str().to_string();
    }
    text.to_string()
}

/// Fallback when no date-bearing element exists: scan every text node.
fn scan_for_date(all_text: &str) -> Option<String> {
    DATE_RE
        .find(all_text)
        .or_else(|| YEAR_RE.find(all_text))
        .map(|m| m.as_str().to_string())
}

/// Prefer `type="local"` / `type="bill"` identifiers, then one that looks
/// like a canonical bill-version id, then the first available.
fn pick_version_id(identifiers: &[(Option<String>, String)]) -> Option<String> {
    identifiers
        .iter()
        .find(|(kind, _)| matches!(kind.as_deref(), Some("local") | Some("bill")))
        .or_else(|| {
            identifiers
                .iter()
                .find(|(_, text)| BILL_VERSION_RE.is_match(text))
        })
        .or_else(|| identifiers.first())
        .map(|(_, text)| text.clone())
}

/// Category → URL, last write wins per known category; unclassifiable URLs
/// get `unknown`, `unknown2`, … keys.
fn categorize_urls(raw_urls: Vec<String>) -> BTreeMap<String, String> {
    let mut urls = BTreeMap::new();
    let mut unknown_count = 0usize;
    for url in raw_urls {
        match classify_url(&url) {
            Some(kind) => {
                urls.insert(kind.to_string(), url);
            }
            None => {
                unknown_count += 1;
                let key = if unknown_count == 1 {
                    "unknown".to_string()
                } else {
                    format!("unknown{unknown_count}")
                };
                urls.insert(key, url);
            }
        }
    }
    urls
}

/// Classify by trailing extension first, then by path segment.
fn classify_url(url: &str) -> Option<&'static str> {
    let lower = url.to_ascii_lowercase();
    let path = lower
        .split_once(['?', '#'])
        .map(|(before, _)| before)
        .unwrap_or(&lower);

    if path.ends_with(".pdf") {
        return Some("pdf");
    }
    if path.ends_with(".xml") {
        return Some("xml");
    }
    if path.ends_with(".htm") || path.ends_with(".html") {
        return Some("html");
    }

    for segment in path.split('/') {
        match segment {
            "pdf" => return Some("pdf"),
            "xml" => return Some("xml"),
            "html" | "htm" => return Some("html"),
            _ => {}
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_date_issued() {
        let xml = r#"<?xml version="1.0"?>
            <mods:mods xmlns:mods="http://www.loc.gov/mods/v3">
              <mods:originInfo>
                <mods:dateIssued>2023-05-01</mods:dateIssued>
              </mods:originInfo>
            </mods:mods>"#;
        let record = parse_mods(xml).expect("parse");
        assert_eq!(record.issued.as_deref(), Some("2023-05-01"));
    }

    #[test]
    fn first_date_element_wins() {
        let xml = r#"<mods>
              <dateIssued>2023-05-01</dateIssued>
              <dateCreated>2020-01-01</dateCreated>
            </mods>"#;
        let record = parse_mods(xml).expect("parse");
        assert_eq!(record.issued.as_deref(), Some("2023-05-01"));
    }

    #[test]
    fn date_created_and_plain_date_are_accepted() {
        let record = parse_mods("<r><dateCreated>2021-03-04</dateCreated></r>").expect("parse");
        assert_eq!(record.issued.as_deref(), Some("2021-03-04"));

        let record = parse_mods("<r><date>issued 2022-11-30 final</date></r>").expect("parse");
        assert_eq!(record.issued.as_deref(), Some("2022-11-30"));
    }

    #[test]
    fn bare_year_is_extracted_when_no_full_date() {
        let record = parse_mods("<r><dateIssued>circa 2019</dateIssued></r>").expect("parse");
        assert_eq!(record.issued.as_deref(), Some("2019"));
    }

    #[test]
    fn raw_text_kept_verbatim_when_nothing_matches() {
        let record = parse_mods("<r><dateIssued>undated</dateIssued></r>").expect("parse");
        assert_eq!(record.issued.as_deref(), Some("undated"));
    }

    #[test]
    fn falls_back_to_scanning_all_text() {
        let record =
            parse_mods("<r><note>printed 2023-07-04 by GPO</note></r>").expect("parse");
        assert_eq!(record.issued.as_deref(), Some("2023-07-04"));

        let record = parse_mods("<r><note>session of 2017</note></r>").expect("parse");
        assert_eq!(record.issued.as_deref(), Some("2017"));
    }

    #[test]
    fn no_date_anywhere_is_none() {
        let record = parse_mods("<r><note>no dates here</note></r>").expect("parse");
        assert!(record.issued.is_none());
    }

    #[test]
    fn identifier_prefers_local_then_pattern_then_first() {
        let xml = r#"<r>
              <identifier type="isbn">978-0000000000</identifier>
              <identifier type="local">hr85ih</identifier>
            </r>"#;
        let record = parse_mods(xml).expect("parse");
        assert_eq!(record.version_id.as_deref(), Some("hr85ih"));

        let xml = r#"<r>
              <identifier type="isbn">978-0000000000</identifier>
              <identifier>s2043enr</identifier>
            </r>"#;
        let record = parse_mods(xml).expect("parse");
        assert_eq!(record.version_id.as_deref(), Some("s2043enr"));

        let xml = r#"<r><identifier type="isbn">978-0000000000</identifier></r>"#;
        let record = parse_mods(xml).expect("parse");
        assert_eq!(record.version_id.as_deref(), Some("978-0000000000"));
    }

    #[test]
    fn urls_categorized_by_extension_and_segment() {
        let xml = r#"<r>
              <location>
                <url>https://example.gov/118/bills/hr85/BILLS-118hr85ih.pdf</url>
                <url>https://example.gov/118/bills/hr85/xml/BILLS-118hr85ih</url>
                <url>https://example.gov/118/bills/hr85/page.HTML</url>
                <url>https://example.gov/118/bills/hr85/plain.txt</url>
              </location>
            </r>"#;
        let record = parse_mods(xml).expect("parse");
        assert_eq!(
            record.urls.get("pdf").map(String::as_str),
            Some("https://example.gov/118/bills/hr85/BILLS-118hr85ih.pdf")
        );
        assert!(record.urls.contains_key("xml"));
        assert!(record.urls.contains_key("html"));
        assert_eq!(
            record.urls.get("unknown").map(String::as_str),
            Some("https://example.gov/118/bills/hr85/plain.txt")
        );
    }

    #[test]
    fn last_url_wins_per_category_and_unknowns_get_suffixes() {
        let xml = r#"<r>
              <url>https://example.gov/a.pdf</url>
              <url>https://example.gov/b.pdf</url>
              <url>https://example.gov/one.dat</url>
              <url>https://example.gov/two.dat</url>
            </r>"#;
        let record = parse_mods(xml).expect("parse");
        assert_eq!(
            record.urls.get("pdf").map(String::as_str),
            Some("https://example.gov/b.pdf")
        );
        assert_eq!(
            record.urls.get("unknown").map(String::as_str),
            Some("https://example.gov/one.dat")
        );
        assert_eq!(
            record.urls.get("unknown2").map(String::as_str),
            Some("https://example.gov/two.dat")
        );
    }

    #[test]
    fn query_strings_do_not_defeat_extension_matching() {
        let record =
            parse_mods("<r><url>https://example.gov/doc.pdf?session=1</url></r>").expect("parse");
        assert!(record.urls.contains_key("pdf"));
    }

    #[test]
    fn empty_document_parses_to_empty_record() {
        let record = parse_mods("<mods></mods>").expect("parse");
        assert_eq!(record, ModsRecord::default());
    }
}
