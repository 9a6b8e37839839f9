use url::Url;

// Resolve a possibly-relative href against a base. Returns None on any
// malformed input; never panics.
pub fn resolve_url(raw: &str, base: &Url) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() { return None; }
    base.join(raw).ok()
}

// A facility detail link is same-site (or root-relative) and its path is
// exactly /kita/<digits>, optionally followed by a path boundary.
pub fn is_valid_detail_link(href: &str, base: &Url) -> bool {
    let href = href.trim();
    if href.is_empty() { return false; }

    let path = if href.starts_with('/') {
        // root-relative: strip query/fragment
        href.split(['?', '#']).next().unwrap_or("")
    } else {
        match Url::parse(href) {
            Ok(abs) => {
                if abs.host_str() != base.host_str() { return false; }
                return is_detail_path(abs.path());
            }
            // relative without leading slash: resolve and re-check host
            Err(_) => match resolve_url(href, base) {
                Some(abs) if abs.host_str() == base.host_str() => return is_detail_path(abs.path()),
                _ => return false,
            },
        }
    };
    is_detail_path(path)
}

fn is_detail_path(path: &str) -> bool {
    let Some(rest) = path.strip_prefix("/kita/") else { return false };
    // digits up to the next path boundary, nothing else
    let id = rest.split('/').next().unwrap_or("");
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) { return false; }
    let after = &rest[id.len()..];
    after.is_empty() || after.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.kitaportal.example/hamburg").unwrap()
    }

    #[test]
    fn resolve_relative_and_absolute() {
        let b = base();
        let abs = resolve_url("/kita/42", &b).unwrap();
        assert_eq!(abs.as_str(), "https://www.kitaportal.example/kita/42");
        let passthrough = resolve_url("https://cdn.example/img.jpg", &b).unwrap();
        assert_eq!(passthrough.host_str(), Some("cdn.example"));
    }

    #[test]
    fn resolve_never_panics_on_garbage() {
        let b = base();
        for raw in ["", "   ", "http://", "%%%%", "::::", "\u{0}"] {
            let _ = resolve_url(raw, &b);
        }
    }

    #[test]
    fn accepts_numeric_detail_links() {
        let b = base();
        assert!(is_valid_detail_link("/kita/123", &b));
        assert!(is_valid_detail_link("/kita/123/", &b));
        assert!(is_valid_detail_link("/kita/123?tab=galerie", &b));
        assert!(is_valid_detail_link("https://www.kitaportal.example/kita/987", &b));
    }

    #[test]
    fn rejects_non_numeric_and_foreign_links() {
        let b = base();
        assert!(!is_valid_detail_link("/kita/abc", &b));
        assert!(!is_valid_detail_link("/kita/123abc", &b));
        assert!(!is_valid_detail_link("/other/123", &b));
        assert!(!is_valid_detail_link("/kita/", &b));
        assert!(!is_valid_detail_link("https://elsewhere.example/kita/123", &b));
        assert!(!is_valid_detail_link("", &b));
    }
}
