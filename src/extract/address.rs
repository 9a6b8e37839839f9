use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use super::heading;
use super::page::{self, Page};
use super::attempt;
use crate::joblog::JobLog;
use crate::util::text::clean_text;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AddressFields {
    pub street: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
}

// Address heading first; an <address> element as fallback. Lines are sorted
// into street vs. "<zip> <city>" by the five-digit postal code.
pub fn extract(page: &Page, source_url: &Url, log: &JobLog) -> AddressFields {
    let fields = attempt(log, "address", || {
        if let Some(block) = heading::heading_block(page, &heading::ADDRESS)? {
            return Ok(from_lines(block.into_items()));
        }
        if let Some(el) = page.select_first("address")? {
            return Ok(from_lines(page::text_lines(&el)));
        }
        Ok(None)
    })
    .unwrap_or_default();

    if fields == AddressFields::default() {
        log.info(format!("address: nothing found on {}", source_url));
    } else {
        log.info(format!(
            "address: street={:?} zip={:?} city={:?}",
            fields.street, fields.zip, fields.city
        ));
    }
    fields
}

fn from_lines(lines: Vec<String>) -> Option<AddressFields> {
    static ZIP_CITY: OnceLock<Regex> = OnceLock::new();
    let zip_city = ZIP_CITY.get_or_init(|| Regex::new(r"^(\d{5})\s+(.+)$").expect("static pattern"));

    let mut fields = AddressFields::default();
    for line in lines {
        if let Some(caps) = zip_city.captures(&line) {
            if fields.zip.is_none() {
                fields.zip = Some(caps[1].to_string());
                fields.city = Some(clean_text(&caps[2]));
            }
        } else if fields.street.is_none() {
            fields.street = Some(line);
        }
    }
    (fields != AddressFields::default()).then_some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn run(html: &str) -> AddressFields {
        let page = Page::parse(html);
        let url = Url::parse("https://www.kitaportal.example/kita/9").unwrap();
        extract(&page, &url, &JobLog::new(Uuid::new_v4()))
    }

    #[test]
    fn heading_with_paragraph() {
        let got = run("<h3>Adresse</h3><p>Musterstraße 12\n22301 Hamburg</p>");
        assert_eq!(got.street.as_deref(), Some("Musterstraße 12"));
        assert_eq!(got.zip.as_deref(), Some("22301"));
        assert_eq!(got.city.as_deref(), Some("Hamburg"));
    }

    #[test]
    fn address_tag_fallback() {
        let got = run("<address>Beispielweg 3<br>80331 München</address>");
        assert_eq!(got.street.as_deref(), Some("Beispielweg 3"));
        assert_eq!(got.zip.as_deref(), Some("80331"));
        assert_eq!(got.city.as_deref(), Some("München"));
    }

    #[test]
    fn absent_without_address_markup() {
        let got = run("<p>Keine Anschrift hier</p>");
        assert_eq!(got, AddressFields::default());
    }
}
