use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use super::heading;
use super::page::{self, Page};
use super::attempt;
use crate::joblog::JobLog;
use crate::util::text::clean_text;
use crate::util::url::resolve_url;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ContactFields {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

pub fn extract(page: &Page, source_url: &Url, log: &JobLog) -> ContactFields {
    let phone = attempt(log, "phone", || scan_phone(page));
    let email = attempt(log, "email", || scan_email(page));
    let website = attempt(log, "website", || scan_website(page, source_url));

    for (name, value) in [("phone", &phone), ("email", &email), ("website", &website)] {
        match value {
            Some(v) => log.info(format!("{name}: {v}")),
            None => log.info(format!("{name}: nothing found on {source_url}")),
        }
    }
    ContactFields { phone, email, website }
}

fn scan_phone(page: &Page) -> anyhow::Result<Option<String>> {
    if let Some(a) = page.select_first("a[href^=\"tel:\"]")? {
        if let Some(href) = page::attr(&a, "href") {
            let number = clean_text(href.trim_start_matches("tel:"));
            if !number.is_empty() {
                return Ok(Some(number));
            }
        }
    }
    // fallback: a number-looking run in the contact block's text
    if let Some(block) = heading::heading_sibling(page, &heading::CONTACT)? {
        static PHONE: OnceLock<Regex> = OnceLock::new();
        let phone = PHONE.get_or_init(|| {
            Regex::new(r"\+?\d[\d\s/().-]{5,}\d").expect("static phone pattern")
        });
        let text = page::text_of(&block);
        if let Some(m) = phone.find(&text) {
            return Ok(Some(clean_text(m.as_str())));
        }
    }
    Ok(None)
}

fn scan_email(page: &Page) -> anyhow::Result<Option<String>> {
    if let Some(a) = page.select_first("a[href^=\"mailto:\"]")? {
        if let Some(href) = page::attr(&a, "href") {
            // drop mailto: and any ?subject=... suffix
            let addr = href.trim_start_matches("mailto:");
            let addr = addr.split('?').next().unwrap_or("").trim();
            if !addr.is_empty() {
                return Ok(Some(addr.to_string()));
            }
        }
    }
    Ok(None)
}

// An outbound link under the contact heading; same-host links are the
// portal's own navigation, not the facility's site.
fn scan_website(page: &Page, base: &Url) -> anyhow::Result<Option<String>> {
    let Some(block) = heading::heading_sibling(page, &heading::CONTACT)? else {
        return Ok(None);
    };
    for a in page::select_in(&block, "a[href]")? {
        let Some(href) = page::attr(&a, "href") else { continue };
        if href.starts_with("tel:") || href.starts_with("mailto:") {
            continue;
        }
        if let Some(abs) = resolve_url(href, base) {
            if abs.host_str() != base.host_str() {
                return Ok(Some(abs.into()));
            }
        }
    }
    Ok(None)
}
