use std::sync::OnceLock;

use anyhow::Result;
use regex::Regex;
use scraper::ElementRef;

use super::page::{self, Page};
use crate::util::text::clean_text;

// A field category is declared as data: a name (used in logs) plus the
// case-insensitive substrings that identify its heading. First matching
// heading-like element in document order wins.
pub struct FieldCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

pub const BENEFITS: FieldCategory =
    FieldCategory { name: "benefits", keywords: &["merkmale", "vorteile", "benefits", "angebote"] };
pub const CERTIFICATIONS: FieldCategory =
    FieldCategory { name: "certifications", keywords: &["zertifi", "gütesiegel", "certificates"] };
pub const AWARDS: FieldCategory =
    FieldCategory { name: "awards", keywords: &["auszeichnung", "awards", "preise"] };
pub const ADDRESS: FieldCategory =
    FieldCategory { name: "address", keywords: &["adresse", "anschrift", "address"] };
pub const CONTACT: FieldCategory =
    FieldCategory { name: "contact", keywords: &["kontakt", "contact"] };
pub const PEDAGOGY: FieldCategory =
    FieldCategory { name: "pedagogy", keywords: &["pädagogik", "konzept", "schwerpunkt", "pedagogy"] };
pub const HOURS: FieldCategory =
    FieldCategory { name: "hours", keywords: &["öffnungszeiten", "betreuungszeiten", "opening hours"] };

const HEADING_LIKE: &str = "h1, h2, h3, h4, h5, h6, b, strong";

impl FieldCategory {
    pub fn matches(&self, heading_text: &str) -> bool {
        let lower = heading_text.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k))
    }
}

// What sits right after a matched heading. Paragraph keeps the raw text so
// newline separators survive until splitting.
pub enum AdjacentBlock {
    List(Vec<String>),
    Paragraph(String),
}

impl AdjacentBlock {
    pub fn into_items(self) -> Vec<String> {
        match self {
            AdjacentBlock::List(items) => items,
            AdjacentBlock::Paragraph(raw) => split_paragraph(&raw),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            AdjacentBlock::List(items) => items.join(", "),
            AdjacentBlock::Paragraph(raw) => clean_text(&raw),
        }
    }
}

// The element right after the category's first matching heading, if any.
pub fn heading_sibling<'a>(page: &'a Page, cat: &FieldCategory) -> Result<Option<ElementRef<'a>>> {
    let headings = page.select_all(HEADING_LIKE)?;
    let Some(heading) = headings.into_iter().find(|h| cat.matches(&page::text_of(h))) else {
        return Ok(None);
    };
    Ok(page::next_sibling_element(&heading, None))
}

// Locate the category's heading and read the immediately following sibling
// element. <ul>/<ol> yields the non-empty item texts, <p> its raw text;
// anything else resolves to None.
pub fn heading_block(page: &Page, cat: &FieldCategory) -> Result<Option<AdjacentBlock>> {
    let Some(next) = heading_sibling(page, cat)? else {
        return Ok(None);
    };
    match next.value().name().to_ascii_lowercase().as_str() {
        "ul" | "ol" => {
            let items: Vec<String> = page::select_in(&next, "li")?
                .iter()
                .map(page::text_of)
                .filter(|t| !t.is_empty())
                .collect();
            Ok((!items.is_empty()).then_some(AdjacentBlock::List(items)))
        }
        "p" => {
            let raw = page::raw_text_of(&next);
            Ok((!raw.trim().is_empty()).then_some(AdjacentBlock::Paragraph(raw)))
        }
        _ => Ok(None),
    }
}

// Split paragraph text on commas, newlines and bullet characters; keep
// cleaned pieces longer than one character.
pub fn split_paragraph(raw: &str) -> Vec<String> {
    static SEP: OnceLock<Regex> = OnceLock::new();
    let sep = SEP.get_or_init(|| Regex::new(r"[,\n•]").expect("static separator pattern"));
    sep.split(raw)
        .map(clean_text)
        .filter(|p| p.chars().count() > 1)
        .collect()
}
