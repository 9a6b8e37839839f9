use anyhow::Result;
use url::Url;

use crate::joblog::JobLog;

pub mod page;
pub mod heading;
pub mod features;
pub mod gallery;
pub mod address;
pub mod contact;
pub mod pedagogy;
pub mod hours;

use page::Page;

// Everything the extractors can pull off one detail page. Every field is
// independently optional; partial extraction is the normal case.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FacilityFields {
    pub name: Option<String>,
    pub street: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub concept: Option<String>,
    pub focus: Option<Vec<String>>,
    pub hours: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub awards: Option<Vec<String>>,
    pub gallery: Option<Vec<String>>,
    pub video_url: Option<String>,
}

// Guard for one extraction scan: an Err becomes a warning in the job log
// and the field resolves to None. Nothing escapes to the caller.
pub(crate) fn attempt<T>(
    log: &JobLog,
    category: &str,
    f: impl FnOnce() -> Result<Option<T>>,
) -> Option<T> {
    match f() {
        Ok(v) => v,
        Err(e) => {
            log.warn(format!("{category}: scan failed: {e:#}"));
            None
        }
    }
}

// Parse once, run every extractor against the same document, merge the
// partial records. Never fails; the job log carries the per-field outcomes.
pub fn extract_facility(html: &str, source_url: &Url, log: &JobLog) -> FacilityFields {
    let page = Page::parse(html);
    log.debug(format!("extracting {source_url}"));

    let name = attempt(log, "name", || {
        Ok(page
            .select_first("h1")?
            .map(|h| page::text_of(&h))
            .filter(|t| !t.is_empty()))
    });

    let addr = address::extract(&page, source_url, log);
    let contact = contact::extract(&page, source_url, log);
    let ped = pedagogy::extract(&page, source_url, log);
    let hrs = hours::extract(&page, source_url, log);
    let feat = features::extract(&page, source_url, log);
    let gal = gallery::extract(&page, source_url, log);

    FacilityFields {
        name,
        street: addr.street,
        zip: addr.zip,
        city: addr.city,
        phone: contact.phone,
        email: contact.email,
        website: contact.website,
        concept: ped.concept,
        focus: ped.focus,
        hours: hrs.hours,
        benefits: feat.benefits,
        certifications: feat.certifications,
        awards: feat.awards,
        gallery: gal.gallery,
        video_url: gal.video_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joblog::LogLevel;
    use uuid::Uuid;

    #[test]
    fn empty_document_yields_all_none() {
        let url = Url::parse("https://www.kitaportal.example/kita/1").unwrap();
        let log = JobLog::new(Uuid::new_v4());
        let got = extract_facility("", &url, &log);
        assert_eq!(got, FacilityFields::default());
        // absence is informational, never a warning
        let entries = log.take();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| e.level != LogLevel::Warn && e.level != LogLevel::Error));
    }

    #[test]
    fn full_detail_page() {
        let html = r#"
        <html><body>
          <h1> Kita  Sonnenschein </h1>
          <h3>Adresse</h3><p>Musterstraße 12
22301 Hamburg</p>
          <a href="tel:+49 40 111222">Telefon</a>
          <a href="mailto:post@sonnenschein.example">Mail</a>
          <h3>Unser Konzept</h3><p>Offene Arbeit mit Waldtagen.</p>
          <h3>Öffnungszeiten</h3><ul><li>Mo–Fr 7–17</li></ul>
          <h3>Merkmale</h3><ul><li>Garten</li><li>Bio-Küche</li></ul>
          <div class="gallery"><a href="/bilder/1.jpg"><img src="/t/1.jpg"></a></div>
          <iframe src="https://www.youtube.com/embed/xyz"></iframe>
        </body></html>
        "#;
        let url = Url::parse("https://www.kitaportal.example/kita/1").unwrap();
        let log = JobLog::new(Uuid::new_v4());
        let got = extract_facility(html, &url, &log);
        assert_eq!(got.name.as_deref(), Some("Kita Sonnenschein"));
        assert_eq!(got.street.as_deref(), Some("Musterstraße 12"));
        assert_eq!(got.zip.as_deref(), Some("22301"));
        assert_eq!(got.city.as_deref(), Some("Hamburg"));
        assert_eq!(got.phone.as_deref(), Some("+49 40 111222"));
        assert_eq!(got.email.as_deref(), Some("post@sonnenschein.example"));
        assert_eq!(got.concept.as_deref(), Some("Offene Arbeit mit Waldtagen."));
        assert_eq!(got.hours.unwrap(), vec!["Mo–Fr 7–17"]);
        assert_eq!(got.benefits.unwrap(), vec!["Garten", "Bio-Küche"]);
        assert_eq!(got.gallery.unwrap(), vec!["https://www.kitaportal.example/bilder/1.jpg"]);
        assert_eq!(got.video_url.unwrap(), "https://www.youtube.com/embed/xyz");
    }

    #[test]
    fn attempt_converts_err_to_warn_and_none() {
        let log = JobLog::new(Uuid::new_v4());
        let got: Option<()> = attempt(&log, "gallery", || anyhow::bail!("boom"));
        assert!(got.is_none());
        let entries = log.take();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert!(entries[0].message.contains("gallery"));
        assert!(entries[0].message.contains("boom"));
    }

    #[test]
    fn failed_scan_does_not_block_the_next_one() {
        let log = JobLog::new(Uuid::new_v4());
        let first: Option<()> = attempt(&log, "gallery", || anyhow::bail!("selector exploded"));
        let second = attempt(&log, "video", || Ok(Some("https://vimeo.com/video/1".to_string())));
        assert!(first.is_none());
        assert_eq!(second.as_deref(), Some("https://vimeo.com/video/1"));
    }
}
