use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

use crate::util::text::clean_text;

// Thin layer over the parsed document. Extractors go through this surface
// only: select by CSS selector (whole page or scoped to an element), cleaned
// text, attribute access, next sibling element.
pub struct Page {
    doc: Html,
}

impl Page {
    pub fn parse(html: &str) -> Page {
        Page { doc: Html::parse_document(html) }
    }

    pub fn select_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let sel = compile(selector)?;
        Ok(self.doc.select(&sel).collect())
    }

    pub fn select_first(&self, selector: &str) -> Result<Option<ElementRef<'_>>> {
        let sel = compile(selector)?;
        Ok(self.doc.select(&sel).next())
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("invalid selector {selector:?}: {e}"))
}

pub fn select_in<'a>(el: &ElementRef<'a>, selector: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = compile(selector)?;
    Ok(el.select(&sel).collect())
}

pub fn select_first_in<'a>(el: &ElementRef<'a>, selector: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = compile(selector)?;
    Ok(el.select(&sel).next())
}

// Whitespace-normalized text of an element and its descendants.
pub fn text_of(el: &ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<String>())
}

pub fn raw_text_of(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

// Text node chunks as cleaned lines; <br>-separated content arrives as
// separate chunks, so this keeps line structure that raw_text_of loses.
pub fn text_lines(el: &ElementRef<'_>) -> Vec<String> {
    el.text()
        .flat_map(|chunk| chunk.lines())
        .map(clean_text)
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn attr<'a>(el: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

// First element sibling after `el`, optionally restricted to a tag name.
pub fn next_sibling_element<'a>(el: &ElementRef<'a>, tag: Option<&str>) -> Option<ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap).find(|e| match tag {
        Some(t) => e.value().name().eq_ignore_ascii_case(t),
        None => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_and_text() {
        let page = Page::parse("<html><body><p class=\"a\">  Hallo \n Welt </p><p>zwei</p></body></html>");
        let first = page.select_first("p.a").unwrap().unwrap();
        assert_eq!(text_of(&first), "Hallo Welt");
        assert_eq!(page.select_all("p").unwrap().len(), 2);
    }

    #[test]
    fn invalid_selector_is_err_not_panic() {
        let page = Page::parse("<p>x</p>");
        assert!(page.select_all("p[").is_err());
    }

    #[test]
    fn next_sibling_skips_text_nodes() {
        let page = Page::parse("<div><h3>Kopf</h3> some text <ul><li>a</li></ul></div>");
        let h = page.select_first("h3").unwrap().unwrap();
        let next = next_sibling_element(&h, None).unwrap();
        assert_eq!(next.value().name(), "ul");
        assert!(next_sibling_element(&h, Some("p")).is_none());
    }

    #[test]
    fn attr_access() {
        let page = Page::parse("<a href=\"/kita/7\">k</a>");
        let a = page.select_first("a").unwrap().unwrap();
        assert_eq!(attr(&a, "href"), Some("/kita/7"));
        assert_eq!(attr(&a, "title"), None);
    }
}
