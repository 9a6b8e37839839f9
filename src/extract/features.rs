use url::Url;

use super::heading::{self, FieldCategory};
use super::page::Page;
use super::attempt;
use crate::joblog::JobLog;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeatureFields {
    pub benefits: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub awards: Option<Vec<String>>,
}

// Benefits, certifications and awards share one shape: keyword heading,
// then a list or comma/bullet paragraph right after it. Each category is
// guarded and logged on its own.
pub fn extract(page: &Page, source_url: &Url, log: &JobLog) -> FeatureFields {
    FeatureFields {
        benefits: category_items(page, &heading::BENEFITS, source_url, log),
        certifications: category_items(page, &heading::CERTIFICATIONS, source_url, log),
        awards: category_items(page, &heading::AWARDS, source_url, log),
    }
}

fn category_items(
    page: &Page,
    cat: &FieldCategory,
    source_url: &Url,
    log: &JobLog,
) -> Option<Vec<String>> {
    let items = attempt(log, cat.name, || {
        let block = heading_block_items(page, cat)?;
        Ok(block.filter(|v: &Vec<String>| !v.is_empty()))
    });
    match &items {
        Some(v) => log.info(format!("{}: {}", cat.name, v.join(", "))),
        None => log.info(format!("{}: nothing found on {}", cat.name, source_url)),
    }
    items
}

fn heading_block_items(page: &Page, cat: &FieldCategory) -> anyhow::Result<Option<Vec<String>>> {
    Ok(heading::heading_block(page, cat)?.map(heading::AdjacentBlock::into_items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joblog::{JobLog, LogLevel};
    use uuid::Uuid;

    fn run(html: &str) -> (FeatureFields, JobLog) {
        let page = Page::parse(html);
        let url = Url::parse("https://www.kitaportal.example/kita/1").unwrap();
        let log = JobLog::new(Uuid::new_v4());
        (extract(&page, &url, &log), log)
    }

    #[test]
    fn list_form() {
        let (got, _) = run("<h3>Vorteile</h3><ul><li>A</li><li>  </li><li>B</li></ul>");
        assert_eq!(got.benefits.unwrap(), vec!["A", "B"]);
        assert!(got.certifications.is_none());
        assert!(got.awards.is_none());
    }

    #[test]
    fn paragraph_form() {
        let (got, _) = run("<h4>Zertifikate</h4><p>ISO 9001, DIN EN, •Gütesiegel</p>");
        assert_eq!(got.certifications.unwrap(), vec!["ISO 9001", "DIN EN", "Gütesiegel"]);
    }

    #[test]
    fn absent_category_logs_info_once() {
        let (got, log) = run("<h2>Etwas anderes</h2><p>ohne Merkmale-Überschrift</p>");
        assert!(got.awards.is_none());
        let entries = log.take();
        let misses: Vec<_> = entries
            .iter()
            .filter(|e| e.level == LogLevel::Info && e.message.starts_with("awards:"))
            .collect();
        assert_eq!(misses.len(), 1);
        assert!(misses[0].message.contains("https://www.kitaportal.example/kita/1"));
    }

    #[test]
    fn categories_are_independent() {
        let (got, _) = run(
            "<h3>Vorteile</h3><ul><li>Garten</li></ul>\
             <h3>Auszeichnungen</h3><p>Kita des Jahres 2023, Umweltpreis</p>",
        );
        assert_eq!(got.benefits.unwrap(), vec!["Garten"]);
        assert!(got.certifications.is_none());
        assert_eq!(got.awards.unwrap(), vec!["Kita des Jahres 2023", "Umweltpreis"]);
    }
}
