//! GFM extended autolinks: bare `http(s)://` and `www.` URLs in plain text.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::RichText;

/// Scheme or `www.` prefix, then everything up to whitespace or `<`, minus
/// trailing punctuation.
const URL_PATTERN: &str = r#"(?i)\b(?:https?://|www\.)[^\s<]*[^\s<?!.,:;*_~'")\]]"#;

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern is valid"))
}

/// Split a run around bare URLs, linking each URL piece.
///
/// Code runs and runs that already carry a link are returned unchanged.
pub fn autolink(run: RichText) -> Vec<RichText> {
    if run.annotations.code || run.link().is_some() {
        return vec![run];
    }

    let content = run.content();
    let mut pieces = Vec::new();
    let mut last = 0;

    for m in url_regex().find_iter(content) {
        if m.start() > last {
            pieces.push(piece(&run, &content[last..m.start()], None));
        }
        let url = m.as_str();
        let href = if url.to_ascii_lowercase().starts_with("www.") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };
        pieces.push(piece(&run, url, Some(href)));
        last = m.end();
    }

    if pieces.is_empty() {
        return vec![run];
    }
    if last < content.len() {
        pieces.push(piece(&run, &content[last..], None));
    }
    pieces
}

fn piece(run: &RichText, content: &str, href: Option<String>) -> RichText {
    let piece = RichText::styled(content, run.annotations);
    match href {
        Some(url) => piece.with_link(url),
        None => piece,
    }
}
