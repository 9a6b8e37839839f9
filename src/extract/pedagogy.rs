use url::Url;

use super::heading::{self, AdjacentBlock};
use super::page::Page;
use super::attempt;
use crate::joblog::JobLog;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PedagogyFields {
    pub concept: Option<String>,
    pub focus: Option<Vec<String>>,
}

// A paragraph after the pedagogy heading is the concept description; a list
// is a set of focus points.
pub fn extract(page: &Page, source_url: &Url, log: &JobLog) -> PedagogyFields {
    let mut fields = PedagogyFields::default();
    let block = attempt(log, "pedagogy", || heading::heading_block(page, &heading::PEDAGOGY));
    match block {
        Some(AdjacentBlock::Paragraph(raw)) => {
            let concept = AdjacentBlock::Paragraph(raw).into_text();
            log.info(format!("pedagogy: {}", concept));
            fields.concept = Some(concept);
        }
        Some(AdjacentBlock::List(items)) => {
            log.info(format!("pedagogy: {}", items.join(", ")));
            fields.focus = Some(items);
        }
        None => log.info(format!("pedagogy: nothing found on {}", source_url)),
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn run(html: &str) -> PedagogyFields {
        let page = Page::parse(html);
        let url = Url::parse("https://www.kitaportal.example/kita/2").unwrap();
        extract(&page, &url, &JobLog::new(Uuid::new_v4()))
    }

    #[test]
    fn paragraph_becomes_concept() {
        let got = run("<h2>Unser Konzept</h2><p>Wir arbeiten \n situationsorientiert.</p>");
        assert_eq!(got.concept.as_deref(), Some("Wir arbeiten situationsorientiert."));
        assert!(got.focus.is_none());
    }

    #[test]
    fn list_becomes_focus() {
        let got = run("<h2>Schwerpunkte</h2><ul><li>Musik</li><li>Bewegung</li></ul>");
        assert!(got.concept.is_none());
        assert_eq!(got.focus.unwrap(), vec!["Musik", "Bewegung"]);
    }

    #[test]
    fn absent_without_heading() {
        let got = run("<p>allgemeiner Text</p>");
        assert_eq!(got, PedagogyFields::default());
    }
}
