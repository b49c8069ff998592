//! Markdown to block conversion.

use std::borrow::Cow;

use pulldown_cmark::{Event, Options, Tag, TagEnd};
use rayon::prelude::*;
use unicode_normalization::UnicodeNormalization;

use super::inline::{collect_runs, InlineCollector};
use super::lexer::{self, Token, TokenKind};
use super::{ConversionResult, ListMode, ParseOptions};
use crate::error::ElementError;
use crate::model::{Block, CodeBlock, RichText};

/// Converts Markdown documents into Notion blocks.
///
/// The lexer configuration is fixed at construction; a converter can be
/// shared between threads and reused for any number of documents.
#[derive(Debug, Clone)]
pub struct MarkdownToBlocks {
    options: ParseOptions,
    lexer_options: Options,
}

impl MarkdownToBlocks {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a converter with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            lexer_options: lexer::gfm_options(),
        }
    }

    /// The converter's options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Convert a Markdown document.
    ///
    /// Elements that fail to convert are skipped and reported in
    /// [`ConversionResult::errors`]; the rest of the document still converts.
    pub fn convert(&self, markdown: &str) -> ConversionResult {
        let input: Cow<'_, str> = if self.options.normalize_unicode {
            Cow::Owned(markdown.nfc().collect())
        } else {
            Cow::Borrowed(markdown)
        };

        let tokens = lexer::tokenize(&input, self.lexer_options);
        let mut blocks = Vec::with_capacity(tokens.len());
        let mut errors = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            match self.convert_token(token) {
                Ok(converted) => blocks.extend(converted),
                Err(e) => {
                    let message = format!(
                        "Failed to convert {} element {}: {}",
                        token.kind.name(),
                        index + 1,
                        e
                    );
                    log::warn!("{}", message);
                    errors.push(message);
                }
            }
        }

        log::debug!(
            "Converted {} elements into {} blocks ({} errors)",
            tokens.len(),
            blocks.len(),
            errors.len()
        );
        ConversionResult::new(blocks, errors)
    }

    /// Convert several documents, in parallel unless the options say
    /// otherwise. Results are returned in input order.
    pub fn convert_batch<S>(&self, inputs: &[S]) -> Vec<ConversionResult>
    where
        S: AsRef<str> + Sync,
    {
        if self.options.parallel {
            inputs.par_iter().map(|s| self.convert(s.as_ref())).collect()
        } else {
            inputs.iter().map(|s| self.convert(s.as_ref())).collect()
        }
    }

    fn convert_token(&self, token: &Token<'_>) -> Result<Vec<Block>, ElementError> {
        match &token.kind {
            TokenKind::Paragraph => self.convert_paragraph(&token.events).map(|b| vec![b]),
            TokenKind::Heading(level) => {
                let runs = self.runs(&token.events)?;
                Ok(vec![Block::heading(*level, runs)])
            }
            TokenKind::List { ordered } => self.convert_list(*ordered, &token.events),
            TokenKind::Code { language } => {
                Ok(vec![self.convert_code(language.as_deref(), &token.events)])
            }
            TokenKind::BlockQuote => Ok(vec![Block::quote(self.runs(&token.events)?)]),
            TokenKind::Other(name) => {
                log::debug!("Dropping unmapped {} element", name);
                Ok(Vec::new())
            }
        }
    }

    fn convert_paragraph(&self, events: &[Event<'_>]) -> Result<Block, ElementError> {
        if let Some((url, alt)) = standalone_image(events) {
            if url.trim().is_empty() {
                return Err(ElementError::MissingImageUrl);
            }
            return Ok(Block::image(url.trim(), self.runs(alt)?));
        }
        Ok(Block::paragraph(self.runs(events)?))
    }

    fn convert_list(&self, ordered: bool, events: &[Event<'_>]) -> Result<Vec<Block>, ElementError> {
        let items = list_items(events);
        if items.is_empty() {
            return Err(ElementError::EmptyList);
        }

        let take = match self.options.list_mode {
            ListMode::FirstItem => 1,
            ListMode::EachItem => items.len(),
        };
        if take < items.len() {
            log::debug!(
                "Keeping first of {} list items ({} dropped)",
                items.len(),
                items.len() - take
            );
        }

        items
            .into_iter()
            .take(take)
            .map(|item| self.convert_item(ordered, item))
            .collect()
    }

    fn convert_item(&self, ordered: bool, item: &[Event<'_>]) -> Result<Block, ElementError> {
        let mut checked = None;
        let mut collector = InlineCollector::new();
        for event in without_nested_lists(item) {
            match event {
                Event::TaskListMarker(done) if checked.is_none() => checked = Some(*done),
                other => collector.push_event(other)?,
            }
        }
        let runs = collector.finish(self.options.max_text_length)?;

        Ok(match (checked, ordered) {
            (Some(done), _) => Block::to_do(runs, done),
            (None, true) => Block::numbered(runs),
            (None, false) => Block::bulleted(runs),
        })
    }

    fn convert_code(&self, language: Option<&str>, events: &[Event<'_>]) -> Block {
        let mut content = String::new();
        for event in events {
            if let Event::Text(text) = event {
                content.push_str(text);
            }
        }
        if content.ends_with('\n') {
            content.pop();
        }

        let run = RichText::new(content);
        let runs = match self.options.max_text_length {
            Some(max) => run.split(max),
            None => vec![run],
        };
        Block::Code {
            code: CodeBlock::new(runs, language),
        }
    }

    fn runs<'e, 'a: 'e>(&self, events: &'e [Event<'a>]) -> Result<Vec<RichText>, ElementError> {
        collect_runs(events, self.options.max_text_length)
    }
}

impl Default for MarkdownToBlocks {
    fn default() -> Self {
        Self::new()
    }
}

/// If a paragraph holds exactly one image and nothing else, return its URL
/// and the events of its alt text.
fn standalone_image<'e, 'a>(events: &'e [Event<'a>]) -> Option<(&'e str, &'e [Event<'a>])> {
    let inner = events.get(1..events.len().checked_sub(1)?)?;
    let (first, rest) = inner.split_first()?;
    let (last, alt) = rest.split_last()?;

    match (first, last) {
        (Event::Start(Tag::Image { dest_url, .. }), Event::End(TagEnd::Image))
            if !alt
                .iter()
                .any(|e| matches!(e, Event::End(TagEnd::Image))) =>
        {
            Some((&**dest_url, alt))
        }
        _ => None,
    }
}

/// Split a list element into the event slices of its top-level items.
fn list_items<'e, 'a>(events: &'e [Event<'a>]) -> Vec<&'e [Event<'a>]> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, event) in events.iter().enumerate() {
        match event {
            Event::Start(tag) => {
                // depth 1 is inside the list itself
                if depth == 1 && matches!(tag, Tag::Item) {
                    start = Some(i);
                }
                depth += 1;
            }
            Event::End(tag) => {
                depth = depth.saturating_sub(1);
                if depth == 1 && matches!(tag, TagEnd::Item) {
                    if let Some(s) = start.take() {
                        items.push(&events[s..=i]);
                    }
                }
            }
            _ => {}
        }
    }
    items
}

/// Events of a list item with any nested lists removed.
fn without_nested_lists<'e, 'a>(item: &'e [Event<'a>]) -> impl Iterator<Item = &'e Event<'a>> {
    let mut nested = 0usize;
    item.iter().filter(move |event| match event {
        Event::Start(Tag::List(_)) => {
            nested += 1;
            false
        }
        Event::End(TagEnd::List(_)) => {
            nested = nested.saturating_sub(1);
            false
        }
        _ => nested == 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(markdown: &str) -> ConversionResult {
        MarkdownToBlocks::new().convert(markdown)
    }

    fn summary(blocks: &[Block]) -> Vec<(&'static str, String)> {
        blocks.iter().map(|b| (b.kind(), b.plain_text())).collect()
    }

    #[test]
    fn test_single_paragraph() {
        let result = convert("Just some text.");
        assert_eq!(summary(&result.blocks), vec![("paragraph", "Just some text.".to_string())]);
        assert!(result.errors.is_none());
    }

    #[test]
    fn test_deep_heading_becomes_paragraph() {
        let result = convert("#### Deep");
        assert_eq!(summary(&result.blocks), vec![("paragraph", "Deep".to_string())]);
    }

    #[test]
    fn test_only_first_list_item_by_default() {
        let result = convert("- one\n- two\n- three");
        assert_eq!(
            summary(&result.blocks),
            vec![("bulleted_list_item", "one".to_string())]
        );
    }

    #[test]
    fn test_each_item_mode() {
        let converter = MarkdownToBlocks::with_options(ParseOptions::new().each_item());
        let result = converter.convert("1. one\n2. two\n");
        assert_eq!(
            summary(&result.blocks),
            vec![
                ("numbered_list_item", "one".to_string()),
                ("numbered_list_item", "two".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_list_is_excluded_from_item_text() {
        let converter = MarkdownToBlocks::with_options(ParseOptions::new().each_item());
        let result = converter.convert("- parent\n  - child\n- sibling\n");
        assert_eq!(
            summary(&result.blocks),
            vec![
                ("bulleted_list_item", "parent".to_string()),
                ("bulleted_list_item", "sibling".to_string()),
            ]
        );
    }

    #[test]
    fn test_loose_list_item() {
        let result = convert("- first para\n\n  second para\n\n- next\n");
        assert_eq!(result.blocks[0].plain_text(), "first para\nsecond para");
    }

    #[test]
    fn test_task_list_items() {
        let converter = MarkdownToBlocks::with_options(ParseOptions::new().each_item());
        let result = converter.convert("- [ ] open\n- [x] done\n");
        assert_eq!(
            result.blocks,
            vec![
                Block::to_do(vec![RichText::new("open")], false),
                Block::to_do(vec![RichText::new("done")], true),
            ]
        );
    }

    #[test]
    fn test_code_block() {
        let result = convert("```typescript\nconsole.log(\"Hello\");\n```");
        assert_eq!(
            result.blocks,
            vec![Block::code("console.log(\"Hello\");", Some("typescript"))]
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let result = convert("```\nplain\n```\n\n    indented\n");
        let languages: Vec<_> = result
            .blocks
            .iter()
            .map(|b| match b {
                Block::Code { code } => code.language.clone(),
                other => panic!("expected code, got {:?}", other),
            })
            .collect();
        assert_eq!(languages, vec!["plain text", "plain text"]);
        assert_eq!(result.blocks[1].plain_text(), "indented");
    }

    #[test]
    fn test_code_block_keeps_inner_blank_lines() {
        let result = convert("```\na\n\nb\n```");
        assert_eq!(result.blocks[0].plain_text(), "a\n\nb");
    }

    #[test]
    fn test_blockquote_joins_paragraphs() {
        let result = convert("> first\n>\n> second");
        assert_eq!(
            summary(&result.blocks),
            vec![("quote", "first\nsecond".to_string())]
        );
    }

    #[test]
    fn test_standalone_image() {
        let result = convert("![Logo](https://example.com/logo.png)");
        assert_eq!(
            result.blocks,
            vec![Block::image(
                "https://example.com/logo.png",
                vec![RichText::new("Logo")]
            )]
        );
    }

    #[test]
    fn test_image_without_url_is_reported() {
        let result = convert("Before\n\n![logo]()\n\nAfter");
        assert_eq!(
            summary(&result.blocks),
            vec![
                ("paragraph", "Before".to_string()),
                ("paragraph", "After".to_string()),
            ]
        );
        let errors = result.errors.expect("errors should be present");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("image has no URL"));
        assert!(errors[0].contains("paragraph element 2"));
    }

    #[test]
    fn test_inline_image_keeps_alt_text() {
        let result = convert("See ![chart](https://x.test/c.png) below");
        assert_eq!(summary(&result.blocks), vec![("paragraph", "See chart below".to_string())]);
    }

    #[test]
    fn test_unmapped_elements_are_dropped_silently() {
        let result = convert("Intro\n\n---\n\n| a |\n|---|\n| 1 |\n\n<div>raw</div>\n\nOutro");
        assert_eq!(
            summary(&result.blocks),
            vec![
                ("paragraph", "Intro".to_string()),
                ("paragraph", "Outro".to_string()),
            ]
        );
        assert!(result.errors.is_none());
    }

    #[test]
    fn test_long_text_is_split() {
        let converter =
            MarkdownToBlocks::with_options(ParseOptions::new().with_max_text_length(Some(10)));
        let result = converter.convert(&"x".repeat(25));
        let runs = result.blocks[0].rich_text().unwrap();
        assert_eq!(runs.len(), 3);
        assert_eq!(result.blocks[0].plain_text(), "x".repeat(25));
    }

    #[test]
    fn test_unicode_normalization() {
        // "が" written as "か" + combining voiced sound mark
        let decomposed = "\u{304B}\u{3099}";
        let converter =
            MarkdownToBlocks::with_options(ParseOptions::new().with_unicode_normalization(true));
        let result = converter.convert(decomposed);
        assert_eq!(result.blocks[0].plain_text(), "\u{304C}");

        let result = MarkdownToBlocks::new().convert(decomposed);
        assert_eq!(result.blocks[0].plain_text(), decomposed);
    }

    #[test]
    fn test_empty_input() {
        let result = convert("");
        assert!(result.blocks.is_empty());
        assert!(result.errors.is_none());
    }

    #[test]
    fn test_batch_preserves_order() {
        let inputs = vec!["# A", "B", "- C"];
        let parallel = MarkdownToBlocks::new().convert_batch(&inputs);
        let sequential =
            MarkdownToBlocks::with_options(ParseOptions::new().sequential()).convert_batch(&inputs);

        assert_eq!(parallel, sequential);
        let kinds: Vec<_> = parallel.iter().map(|r| r.blocks[0].kind()).collect();
        assert_eq!(kinds, vec!["heading_1", "paragraph", "bulleted_list_item"]);
    }

    #[test]
    fn test_list_items_helper() {
        let tokens = lexer::tokenize("- a\n  - x\n- b\n", lexer::gfm_options());
        let items = list_items(&tokens[0].events);
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0].first(), Some(Event::Start(Tag::Item))));
        assert!(matches!(items[1].last(), Some(Event::End(TagEnd::Item))));
    }
}
