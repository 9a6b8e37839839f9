use indexmap::IndexSet;
use url::Url;

use super::page::{self, Page};
use super::attempt;
use crate::joblog::JobLog;
use crate::util::url::resolve_url;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GalleryFields {
    pub gallery: Option<Vec<String>>,
    pub video_url: Option<String>,
}

const GALLERY_ANCHORS: &str = ".gallery a, .image-gallery a, #gallery a";
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

// Two separately guarded scans: a gallery failure must not keep the video
// scan from running, and vice versa.
pub fn extract(page: &Page, source_url: &Url, log: &JobLog) -> GalleryFields {
    let gallery = attempt(log, "gallery", || scan_gallery(page, source_url, log));
    match &gallery {
        Some(urls) => log.info(format!("gallery: {} image(s)", urls.len())),
        None => log.info(format!("gallery: nothing found on {}", source_url)),
    }

    let video_url = attempt(log, "video", || scan_video(page));
    match &video_url {
        Some(v) => log.info(format!("video: {}", v)),
        None => log.info(format!("video: nothing found on {}", source_url)),
    }

    GalleryFields { gallery, video_url }
}

fn scan_gallery(page: &Page, base: &Url, log: &JobLog) -> anyhow::Result<Option<Vec<String>>> {
    let mut urls: IndexSet<String> = IndexSet::new();
    for anchor in page.select_all(GALLERY_ANCHORS)? {
        let img_src = page::select_first_in(&anchor, "img")?
            .and_then(|img| page::attr(&img, "src").map(str::to_string));
        let href = page::attr(&anchor, "href");

        let candidate = match (href, img_src) {
            // anchor around an image: prefer the href when it points at an
            // image file, otherwise fall back to the thumbnail's src
            (Some(href), Some(src)) => match resolve_url(href, base) {
                Some(abs) if has_image_extension(&abs) => Some(abs),
                _ => resolve_url(&src, base),
            },
            (None, Some(src)) => resolve_url(&src, base),
            // no image descendant: not a gallery candidate
            (_, None) => continue,
        };

        match candidate {
            Some(abs) => { urls.insert(abs.into()); }
            None => log.warn(format!("gallery: could not resolve image link on {}", base)),
        }
    }
    Ok((!urls.is_empty()).then(|| urls.into_iter().collect()))
}

fn has_image_extension(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(&format!(".{ext}")))
}

// First iframe in document order embedding YouTube or Vimeo wins.
fn scan_video(page: &Page) -> anyhow::Result<Option<String>> {
    for iframe in page.select_all("iframe")? {
        if let Some(src) = page::attr(&iframe, "src") {
            if src.contains("youtube.com/embed") || src.contains("vimeo.com/video") {
                return Ok(Some(src.to_string()));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn run(html: &str) -> GalleryFields {
        let page = Page::parse(html);
        let url = Url::parse("https://www.kitaportal.example/kita/5").unwrap();
        extract(&page, &url, &JobLog::new(Uuid::new_v4()))
    }

    #[test]
    fn dedupes_resolved_urls() {
        let got = run(
            "<div class=\"gallery\">\
               <a href=\"/img/a.jpg\"><img src=\"/thumb/a.jpg\"></a>\
               <a href=\"https://www.kitaportal.example/img/a.jpg\"><img src=\"/thumb/a2.jpg\"></a>\
             </div>",
        );
        assert_eq!(got.gallery.unwrap(), vec!["https://www.kitaportal.example/img/a.jpg"]);
    }

    #[test]
    fn falls_back_to_img_src_for_non_image_href() {
        let got = run(
            "<div id=\"gallery\">\
               <a href=\"/lightbox/42\"><img src=\"photo.jpg\"></a>\
             </div>",
        );
        assert_eq!(got.gallery.unwrap(), vec!["https://www.kitaportal.example/kita/photo.jpg"]);
    }

    #[test]
    fn anchor_without_image_is_skipped() {
        let got = run("<div class=\"image-gallery\"><a href=\"/img/x.png\">nur Text</a></div>");
        assert!(got.gallery.is_none());
    }

    #[test]
    fn first_matching_iframe_wins() {
        let got = run(
            "<iframe src=\"https://maps.example/embed\"></iframe>\
             <iframe src=\"https://www.youtube.com/embed/abc123\"></iframe>\
             <iframe src=\"https://vimeo.com/video/999\"></iframe>",
        );
        assert_eq!(got.video_url.unwrap(), "https://www.youtube.com/embed/abc123");
    }

    #[test]
    fn video_found_even_without_gallery() {
        let got = run("<iframe src=\"https://vimeo.com/video/7\"></iframe>");
        assert!(got.gallery.is_none());
        assert_eq!(got.video_url.unwrap(), "https://vimeo.com/video/7");
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let got = run("<div class=\"gallery\"><a href=\"/img/B.JPG\"><img src=\"/t.png\"></a></div>");
        assert_eq!(got.gallery.unwrap(), vec!["https://www.kitaportal.example/img/B.JPG"]);
    }
}
