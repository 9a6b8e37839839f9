use url::Url;

use super::heading::{self, AdjacentBlock};
use super::page::Page;
use super::attempt;
use crate::joblog::JobLog;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HoursFields {
    pub hours: Option<Vec<String>>,
}

pub fn extract(page: &Page, source_url: &Url, log: &JobLog) -> HoursFields {
    let hours = attempt(log, "hours", || {
        let block = heading::heading_block(page, &heading::HOURS)?;
        Ok(block
            .map(AdjacentBlock::into_items)
            .filter(|v: &Vec<String>| !v.is_empty()))
    });
    match &hours {
        Some(lines) => log.info(format!("hours: {}", lines.join("; "))),
        None => log.info(format!("hours: nothing found on {}", source_url)),
    }
    HoursFields { hours }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn run(html: &str) -> HoursFields {
        let page = Page::parse(html);
        let url = Url::parse("https://www.kitaportal.example/kita/4").unwrap();
        extract(&page, &url, &JobLog::new(Uuid::new_v4()))
    }

    #[test]
    fn list_of_hour_lines() {
        let got = run(
            "<h3>Öffnungszeiten</h3><ul><li>Mo–Fr 7:00–17:00</li><li>Sa geschlossen</li></ul>",
        );
        assert_eq!(got.hours.unwrap(), vec!["Mo–Fr 7:00–17:00", "Sa geschlossen"]);
    }

    #[test]
    fn paragraph_split_into_lines() {
        let got = run("<h3>Betreuungszeiten</h3><p>Mo–Do 7:30–16:30\nFr 7:30–14:00</p>");
        assert_eq!(got.hours.unwrap(), vec!["Mo–Do 7:30–16:30", "Fr 7:30–14:00"]);
    }

    #[test]
    fn absent_without_heading() {
        let got = run("<h3>Preise</h3><p>auf Anfrage</p>");
        assert!(got.hours.is_none());
    }
}
