//! Inline content extraction: events to rich text runs.

use super::autolink::autolink;
use crate::error::ElementError;
use crate::model::{Annotations, Link, RichText, TextContent};
use pulldown_cmark::{Event, Tag, TagEnd};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Style {
    Emphasis,
    Strong,
    Strikethrough,
    Link(String),
    Image,
}

impl Style {
    fn name(&self) -> &'static str {
        match self {
            Style::Emphasis => "emphasis",
            Style::Strong => "strong",
            Style::Strikethrough => "strikethrough",
            Style::Link(_) => "link",
            Style::Image => "image",
        }
    }
}

/// Accumulates rich text runs from an inline event stream.
///
/// Block-level tags inside the stream (paragraphs of a quote, list item
/// bodies) are flattened; consecutive blocks are separated by a newline.
#[derive(Debug, Default)]
pub struct InlineCollector {
    runs: Vec<RichText>,
    styles: Vec<Style>,
    pending_break: bool,
}

impl InlineCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a sequence of events.
    pub fn extend<'e, 'a: 'e, I>(&mut self, events: I) -> Result<(), ElementError>
    where
        I: IntoIterator<Item = &'e Event<'a>>,
    {
        for event in events {
            self.push_event(event)?;
        }
        Ok(())
    }

    /// Feed a single event.
    pub fn push_event(&mut self, event: &Event<'_>) -> Result<(), ElementError> {
        match event {
            Event::Start(Tag::Emphasis) => self.styles.push(Style::Emphasis),
            Event::Start(Tag::Strong) => self.styles.push(Style::Strong),
            Event::Start(Tag::Strikethrough) => self.styles.push(Style::Strikethrough),
            Event::Start(Tag::Link { dest_url, .. }) => {
                self.styles.push(Style::Link(dest_url.to_string()))
            }
            Event::Start(Tag::Image { .. }) => self.styles.push(Style::Image),

            Event::End(TagEnd::Emphasis) => self.close(Style::Emphasis)?,
            Event::End(TagEnd::Strong) => self.close(Style::Strong)?,
            Event::End(TagEnd::Strikethrough) => self.close(Style::Strikethrough)?,
            Event::End(TagEnd::Link) => self.close(Style::Link(String::new()))?,
            Event::End(TagEnd::Image) => self.close(Style::Image)?,

            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell,
            ) => {
                self.pending_break = !self.runs.is_empty();
            }

            Event::Text(text) => self.push_text(text, false),
            Event::Code(text) => self.push_text(text, true),
            Event::SoftBreak | Event::HardBreak => self.push_text("\n", false),

            _ => {}
        }
        Ok(())
    }

    /// Finish collecting: link bare URLs, then split runs longer than
    /// `max_chars`.
    pub fn finish(self, max_chars: Option<usize>) -> Result<Vec<RichText>, ElementError> {
        if let Some(open) = self.styles.last() {
            return Err(ElementError::Unbalanced(open.name()));
        }
        let runs = self.runs.into_iter().flat_map(autolink);
        Ok(match max_chars {
            Some(max) => runs.flat_map(|r| r.split(max)).collect(),
            None => runs.collect(),
        })
    }

    fn close(&mut self, expected: Style) -> Result<(), ElementError> {
        match self.styles.pop() {
            Some(Style::Link(_)) if matches!(expected, Style::Link(_)) => Ok(()),
            Some(open) if open == expected => Ok(()),
            _ => Err(ElementError::Unbalanced(expected.name())),
        }
    }

    fn annotations(&self, code: bool) -> Annotations {
        let mut annotations = Annotations {
            code,
            ..Default::default()
        };
        for style in &self.styles {
            match style {
                Style::Emphasis => annotations.italic = true,
                Style::Strong => annotations.bold = true,
                Style::Strikethrough => annotations.strikethrough = true,
                Style::Link(_) | Style::Image => {}
            }
        }
        annotations
    }

    fn link(&self) -> Option<Link> {
        // Image alt text inside a link is not itself linked in Notion, but the
        // surrounding link still applies.
        self.styles.iter().rev().find_map(|s| match s {
            Style::Link(url) if !url.is_empty() => Some(Link { url: url.clone() }),
            _ => None,
        })
    }

    fn push_text(&mut self, text: &str, code: bool) {
        if text.is_empty() {
            return;
        }
        if self.pending_break {
            self.pending_break = false;
            self.append(RichText::new("\n"));
        }
        let run = RichText {
            text: TextContent {
                content: text.to_string(),
                link: self.link(),
            },
            annotations: self.annotations(code),
            ..Default::default()
        };
        self.append(run);
    }

    fn append(&mut self, run: RichText) {
        match self.runs.last_mut() {
            Some(last) if last.same_style(&run) => last.text.content.push_str(&run.text.content),
            _ => self.runs.push(run),
        }
    }
}

/// Collect rich text runs from a slice of events.
pub fn collect_runs<'e, 'a: 'e, I>(
    events: I,
    max_chars: Option<usize>,
) -> Result<Vec<RichText>, ElementError>
where
    I: IntoIterator<Item = &'e Event<'a>>,
{
    let mut collector = InlineCollector::new();
    collector.extend(events)?;
    collector.finish(max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::gfm_options;
    use pulldown_cmark::Parser;

    fn runs(markdown: &str) -> Vec<RichText> {
        let events: Vec<Event> = Parser::new_ext(markdown, gfm_options()).collect();
        collect_runs(&events, None).unwrap()
    }

    #[test]
    fn test_plain_paragraph_is_one_run() {
        let runs = runs("Hello [world] & friends");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].content(), "Hello [world] & friends");
        assert!(runs[0].annotations.is_default());
    }

    #[test]
    fn test_annotations() {
        let runs = runs("a **b** *c* ~~d~~ `e`");
        let styled: Vec<_> = runs
            .iter()
            .map(|r| (r.content(), r.annotations))
            .collect();
        assert_eq!(styled[0].0, "a ");
        assert_eq!(styled[1].0, "b");
        assert!(styled[1].1.bold);
        assert_eq!(styled[3].0, "c");
        assert!(styled[3].1.italic);
        assert_eq!(styled[5].0, "d");
        assert!(styled[5].1.strikethrough);
        assert_eq!(styled[7].0, "e");
        assert!(styled[7].1.code);
    }

    #[test]
    fn test_nested_annotations() {
        let runs = runs("***both***");
        assert_eq!(runs.len(), 1);
        assert!(runs[0].annotations.bold);
        assert!(runs[0].annotations.italic);
    }

    #[test]
    fn test_link() {
        let runs = runs("see [the docs](https://example.com/docs) now");
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].content(), "the docs");
        assert_eq!(runs[1].link(), Some("https://example.com/docs"));
        assert_eq!(runs[2].link(), None);
    }

    #[test]
    fn test_bare_url_becomes_link() {
        let runs = runs("see https://example.com now");
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].content(), "https://example.com");
        assert_eq!(runs[1].link(), Some("https://example.com"));
        assert_eq!(runs[0].link(), None);
        assert_eq!(runs[2].content(), " now");
    }

    #[test]
    fn test_url_in_code_span_is_not_linked() {
        let runs = runs("run `curl https://example.com`");
        assert!(runs.iter().all(|r| r.link().is_none()));
    }

    #[test]
    fn test_soft_break_becomes_newline() {
        let runs = runs("line one\nline two");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].content(), "line one\nline two");
    }

    #[test]
    fn test_paragraphs_separated_by_newline() {
        let runs = runs("first\n\nsecond");
        assert_eq!(runs[0].content(), "first\nsecond");
    }

    #[test]
    fn test_unbalanced_end_is_error() {
        let events = vec![Event::Text("x".into()), Event::End(TagEnd::Strong)];
        let result = collect_runs(&events, None);
        assert!(matches!(result, Err(ElementError::Unbalanced("strong"))));
    }

    #[test]
    fn test_unclosed_style_is_error() {
        let events = vec![Event::Start(Tag::Emphasis), Event::Text("x".into())];
        let result = collect_runs(&events, None);
        assert!(matches!(result, Err(ElementError::Unbalanced("emphasis"))));
    }

    #[test]
    fn test_max_chars_splits_runs() {
        let events = vec![Event::Text("abcdef".into())];
        let runs = collect_runs(&events, Some(4)).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].content(), "abcd");
        assert_eq!(runs[1].content(), "ef");
    }
}
