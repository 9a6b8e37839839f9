// Collapse all whitespace runs (spaces, tabs, newlines) to a single space
// and trim. Idempotent.
pub fn clean_text(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                if !buf.is_empty() { buf.push(' '); }
                in_ws = true;
            }
        } else {
            buf.push(ch);
            in_ws = false;
        }
    }
    buf.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(clean_text("  Kita \t Sonnenschein \n\n e.V.  "), "Kita Sonnenschein e.V.");
    }

    #[test]
    fn idempotent() {
        let inputs = ["", "  ", "a", " a  b ", "x\n\ny\tz", "ü  ber\r\nall"];
        for s in inputs {
            let once = clean_text(s);
            assert_eq!(clean_text(&once), once);
        }
    }

    #[test]
    fn no_double_whitespace_in_output() {
        let out = clean_text("a \t b\n\n c");
        assert!(!out.contains("  "));
        assert!(!out.starts_with(' ') && !out.ends_with(' '));
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \n\t "), "");
    }
}
