use indexmap::IndexSet;
use url::Url;

use crate::extract::page::{self, Page};
use crate::util::url::{is_valid_detail_link, resolve_url};

// Pull the facility detail links out of a listing page: every anchor whose
// href is a same-site /kita/<id> link, resolved, first-seen order, no
// duplicates. A selector failure here would be a bug in the literal "a[href]"
// selector, so the empty result fallback is fine.
pub fn collect_detail_links(html: &str, base: &Url) -> Vec<Url> {
    let page = Page::parse(html);
    let anchors = page.select_all("a[href]").unwrap_or_default();
    let mut seen: IndexSet<Url> = IndexSet::new();
    for a in anchors {
        let Some(href) = page::attr(&a, "href") else { continue };
        if !is_valid_detail_link(href, base) { continue }
        if let Some(abs) = resolve_url(href, base) {
            seen.insert(abs);
        }
    }
    seen.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_valid_links_in_order_without_duplicates() {
        let base = Url::parse("https://www.kitaportal.example/hamburg").unwrap();
        let html = r#"
        <a href="/kita/12">Kita A</a>
        <a href="/kita/abc">kaputt</a>
        <a href="https://www.kitaportal.example/kita/7">Kita B</a>
        <a href="/kita/12">Kita A nochmal</a>
        <a href="https://elsewhere.example/kita/9">fremd</a>
        <a href="/jobs/3">Stellen</a>
        "#;
        let links: Vec<String> = collect_detail_links(html, &base)
            .into_iter()
            .map(Into::into)
            .collect();
        assert_eq!(links, vec![
            "https://www.kitaportal.example/kita/12",
            "https://www.kitaportal.example/kita/7",
        ]);
    }

    #[test]
    fn empty_listing_yields_no_links() {
        let base = Url::parse("https://www.kitaportal.example/").unwrap();
        assert!(collect_detail_links("<p>keine Links</p>", &base).is_empty());
    }
}
