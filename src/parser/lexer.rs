//! Segmentation of Markdown into top-level elements.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

/// Lexer configuration with the GFM extensions enabled.
pub fn gfm_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Kind of a top-level Markdown element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Paragraph (possibly a standalone image)
    Paragraph,
    /// ATX or setext heading with its depth (1-6)
    Heading(u8),
    /// Bulleted or numbered list
    List {
        /// Whether the list is numbered
        ordered: bool,
    },
    /// Fenced or indented code block
    Code {
        /// Language from the fence info string
        language: Option<String>,
    },
    /// Block quote
    BlockQuote,
    /// Anything without a block mapping (tables, rules, HTML, ...)
    Other(&'static str),
}

impl TokenKind {
    /// Short name used in log and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Paragraph => "paragraph",
            TokenKind::Heading(_) => "heading",
            TokenKind::List { .. } => "list",
            TokenKind::Code { .. } => "code",
            TokenKind::BlockQuote => "blockquote",
            TokenKind::Other(name) => name,
        }
    }
}

/// One top-level element with the full event stream that makes it up,
/// including its opening and closing tags.
#[derive(Debug, Clone)]
pub struct Token<'a> {
    /// Element kind
    pub kind: TokenKind,
    /// Events of the element, in document order
    pub events: Vec<Event<'a>>,
}

/// Split a Markdown document into its top-level elements.
pub fn tokenize(input: &str, options: Options) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut current: Option<Token<'_>> = None;
    let mut depth = 0usize;

    for event in Parser::new_ext(input, options) {
        match &event {
            Event::Start(tag) => {
                if depth == 0 {
                    current = Some(Token {
                        kind: classify(tag),
                        events: Vec::new(),
                    });
                }
                depth += 1;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }

        match current.as_mut() {
            Some(token) => token.events.push(event),
            None => tokens.push(Token {
                kind: TokenKind::Other(leaf_name(&event)),
                events: vec![event],
            }),
        }

        if depth == 0 {
            if let Some(token) = current.take() {
                tokens.push(token);
            }
        }
    }

    // The lexer always closes what it opens; keep a truncated element anyway.
    if let Some(token) = current.take() {
        tokens.push(token);
    }

    log::trace!("Segmented Markdown into {} elements", tokens.len());
    tokens
}

fn classify(tag: &Tag<'_>) -> TokenKind {
    match tag {
        Tag::Paragraph => TokenKind::Paragraph,
        Tag::Heading { level, .. } => TokenKind::Heading(heading_depth(*level)),
        Tag::List(start) => TokenKind::List {
            ordered: start.is_some(),
        },
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => TokenKind::Code {
            language: fence_language(info),
        },
        Tag::CodeBlock(CodeBlockKind::Indented) => TokenKind::Code { language: None },
        Tag::BlockQuote(_) => TokenKind::BlockQuote,
        Tag::Table(_) => TokenKind::Other("table"),
        Tag::HtmlBlock => TokenKind::Other("html"),
        _ => TokenKind::Other("other"),
    }
}

fn leaf_name(event: &Event<'_>) -> &'static str {
    match event {
        Event::Rule => "thematic_break",
        Event::Html(_) | Event::InlineHtml(_) => "html",
        _ => "text",
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// First word of a fence info string (`rust,ignore` and `ts title=a.ts` both
/// name their language first).
/// Language of a fenced code block: the info string up to any attribute
/// list (`{...}`) or comma-separated flags. Spaces are kept, so multi-word
/// languages such as `plain text` and `visual basic` survive.
fn fence_language(info: &str) -> Option<String> {
    info.split(['{', ','])
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input, gfm_options())
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_top_level_elements() {
        let input = "# Title\n\nBody\n\n- a\n- b\n\n```rust\nfn main() {}\n```\n\n> quote";
        assert_eq!(
            kinds(input),
            vec![
                TokenKind::Heading(1),
                TokenKind::Paragraph,
                TokenKind::List { ordered: false },
                TokenKind::Code {
                    language: Some("rust".to_string())
                },
                TokenKind::BlockQuote,
            ]
        );
    }

    #[test]
    fn test_nested_content_stays_in_one_token() {
        let tokens = tokenize("- a\n  - b\n- c\n", gfm_options());
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].events.first(), Some(Event::Start(Tag::List(None)))));
        assert!(matches!(tokens[0].events.last(), Some(Event::End(_))));
    }

    #[test]
    fn test_unmapped_elements() {
        let input = "---\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n<div>x</div>\n";
        assert_eq!(
            kinds(input),
            vec![
                TokenKind::Other("thematic_break"),
                TokenKind::Other("table"),
                TokenKind::Other("html"),
            ]
        );
    }

    #[test]
    fn test_footnote_syntax_is_plain_paragraph() {
        assert_eq!(kinds("Text with a note[^1].\n"), vec![TokenKind::Paragraph]);
    }

    #[test]
    fn test_ordered_list_and_indented_code() {
        assert_eq!(
            kinds("3. three\n4. four\n\n    indented\n"),
            vec![
                TokenKind::List { ordered: true },
                TokenKind::Code { language: None },
            ]
        );
    }

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("rust,ignore"), Some("rust".to_string()));
        assert_eq!(fence_language("python {.numberLines}"), Some("python".to_string()));
        assert_eq!(fence_language(" plain text "), Some("plain text".to_string()));
        assert_eq!(fence_language("visual basic"), Some("visual basic".to_string()));
        assert_eq!(fence_language(""), None);
        assert_eq!(fence_language("   "), None);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("", gfm_options()).is_empty());
    }
}
