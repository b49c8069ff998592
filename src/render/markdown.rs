//! Markdown rendering for Notion blocks and page properties.

use crate::model::{join_content, Block, Page, Properties, PropertyValue, RichText};

/// Renders blocks and page properties as Markdown.
///
/// Rich text annotations are not written back as Markdown emphasis; only the
/// text content survives rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockToMarkdown;

impl BlockToMarkdown {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render a block sequence.
    pub fn convert(&self, blocks: &[Block]) -> String {
        let mut output = String::new();
        for (i, block) in blocks.iter().enumerate() {
            self.render_block(&mut output, block, blocks.get(i + 1));
        }
        output
    }

    /// Render page properties, one line per recognized property, in map order.
    pub fn convert_properties(&self, properties: &Properties) -> String {
        let mut output = String::new();
        for (name, value) in properties {
            self.render_property(&mut output, name, value);
        }
        output
    }

    /// Render a page: its properties followed by its content.
    pub fn convert_page(&self, page: &Page, blocks: &[Block]) -> String {
        let mut output = self.convert_properties(&page.properties);
        output.push_str(&self.convert(blocks));
        output
    }

    fn render_block(&self, output: &mut String, block: &Block, next: Option<&Block>) {
        match block {
            Block::Paragraph { paragraph } => {
                output.push_str(&join_content(&paragraph.rich_text));
                output.push_str("\n\n");
            }
            Block::Heading1 { heading_1: b }
            | Block::Heading2 { heading_2: b }
            | Block::Heading3 { heading_3: b } => {
                let level = block.heading_level().unwrap_or(1);
                output.push_str(&"#".repeat(level as usize));
                output.push(' ');
                output.push_str(&join_content(&b.rich_text));
                output.push_str("\n\n");
            }
            Block::BulletedListItem { bulleted_list_item } => {
                self.render_list_item(output, "- ", &bulleted_list_item.rich_text, next);
            }
            Block::NumberedListItem { numbered_list_item } => {
                self.render_list_item(output, "1. ", &numbered_list_item.rich_text, next);
            }
            Block::ToDo { to_do } => {
                let marker = if to_do.checked { "- [x] " } else { "- [ ] " };
                self.render_list_item(output, marker, &to_do.rich_text, next);
            }
            Block::Code { code } => {
                output.push_str("```");
                output.push_str(&code.language);
                output.push('\n');
                output.push_str(&join_content(&code.rich_text));
                output.push_str("\n```\n\n");
            }
            Block::Quote { quote } => {
                output.push_str("> ");
                output.push_str(&join_content(&quote.rich_text));
                output.push_str("\n\n");
            }
            Block::Image { image } => {
                output.push_str(&format!(
                    "![{}]({})\n\n",
                    join_content(&image.caption),
                    image.url()
                ));
            }
            Block::Unsupported => {
                log::trace!("Skipping unsupported block");
            }
        }
    }

    fn render_list_item(
        &self,
        output: &mut String,
        marker: &str,
        rich_text: &[RichText],
        next: Option<&Block>,
    ) {
        output.push_str(marker);
        output.push_str(&join_content(rich_text));
        output.push('\n');

        // Close the list run with a blank line
        if !next.is_some_and(Block::is_list_item) {
            output.push('\n');
        }
    }

    fn render_property(&self, output: &mut String, name: &str, value: &PropertyValue) {
        match value {
            PropertyValue::Title { title } => {
                if let Some(first) = title.first() {
                    output.push_str(&format!("# {}\n\n", first.plain_text()));
                }
            }
            PropertyValue::RichText { rich_text } => {
                if let Some(first) = rich_text.first() {
                    output.push_str(&format!("**{}**: {}\n\n", name, first.plain_text()));
                }
            }
            PropertyValue::Date { date: Some(date) } => {
                output.push_str(&format!("**{}**: {}\n\n", name, date.start));
            }
            PropertyValue::Url { url: Some(url) } => {
                output.push_str(&format!("**{}**: [{}]({})\n\n", name, url, url));
            }
            PropertyValue::Date { date: None } | PropertyValue::Url { url: None } => {}
            PropertyValue::Unsupported => {
                log::trace!("Skipping unsupported property {}", name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Annotations, DateValue};

    fn text(s: &str) -> Vec<RichText> {
        vec![RichText::new(s)]
    }

    fn render(blocks: &[Block]) -> String {
        BlockToMarkdown::new().convert(blocks)
    }

    #[test]
    fn test_paragraph_and_headings() {
        let blocks = vec![
            Block::heading(1, text("One")),
            Block::heading(2, text("Two")),
            Block::heading(3, text("Three")),
            Block::paragraph(text("Body")),
        ];
        assert_eq!(render(&blocks), "# One\n\n## Two\n\n### Three\n\nBody\n\n");
    }

    #[test]
    fn test_list_run() {
        let blocks = vec![Block::bulleted(text("A")), Block::bulleted(text("B"))];
        assert_eq!(render(&blocks), "- A\n- B\n\n");
    }

    #[test]
    fn test_mixed_list_run_then_paragraph() {
        let blocks = vec![
            Block::numbered(text("first")),
            Block::bulleted(text("second")),
            Block::to_do(text("third"), true),
            Block::paragraph(text("after")),
        ];
        assert_eq!(
            render(&blocks),
            "1. first\n- second\n- [x] third\n\nafter\n\n"
        );
    }

    #[test]
    fn test_code_block() {
        let blocks = vec![Block::code("const x = 1;", Some("typescript"))];
        assert_eq!(render(&blocks), "```typescript\nconst x = 1;\n```\n\n");
    }

    #[test]
    fn test_quote_and_image() {
        let blocks = vec![
            Block::quote(text("Quoted")),
            Block::image("https://x.test/a.png", text("Alt")),
        ];
        assert_eq!(render(&blocks), "> Quoted\n\n![Alt](https://x.test/a.png)\n\n");
    }

    #[test]
    fn test_unsupported_renders_nothing() {
        let blocks = vec![
            Block::paragraph(text("a")),
            Block::Unsupported,
            Block::paragraph(text("b")),
        ];
        assert_eq!(render(&blocks), "a\n\nb\n\n");
        assert_eq!(render(&[Block::Unsupported]), "");
    }

    #[test]
    fn test_list_item_before_unsupported_closes_run() {
        let blocks = vec![Block::bulleted(text("A")), Block::Unsupported];
        assert_eq!(render(&blocks), "- A\n\n");
    }

    #[test]
    fn test_annotations_are_not_rendered() {
        let runs = vec![
            RichText::new("plain "),
            RichText::bold("bold"),
            RichText::styled(
                " code",
                Annotations {
                    code: true,
                    ..Default::default()
                },
            ),
        ];
        assert_eq!(render(&[Block::paragraph(runs)]), "plain bold code\n\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(&[]), "");
        assert_eq!(BlockToMarkdown::new().convert_properties(&Properties::new()), "");
    }

    #[test]
    fn test_properties() {
        let mut props = Properties::new();
        props.insert("Name".into(), PropertyValue::title("Roadmap"));
        props.insert("Summary".into(), PropertyValue::rich_text("Q3 plan"));
        props.insert("Status".into(), PropertyValue::Unsupported);
        props.insert(
            "Due".into(),
            PropertyValue::Date {
                date: Some(DateValue {
                    start: "2026-03-01".into(),
                    end: Some("2026-03-05".into()),
                    time_zone: None,
                }),
            },
        );
        props.insert("Link".into(), PropertyValue::url("https://example.com"));

        assert_eq!(
            BlockToMarkdown::new().convert_properties(&props),
            "# Roadmap\n\n**Summary**: Q3 plan\n\n**Due**: 2026-03-01\n\n**Link**: [https://example.com](https://example.com)\n\n"
        );
    }

    #[test]
    fn test_title_uses_display_text_of_first_run() {
        let mut first = RichText::new("raw");
        first.plain_text = Some("Shown".into());
        let mut props = Properties::new();
        props.insert(
            "Name".into(),
            PropertyValue::Title {
                title: vec![first, RichText::new(" ignored")],
            },
        );
        assert_eq!(BlockToMarkdown::new().convert_properties(&props), "# Shown\n\n");
    }

    #[test]
    fn test_empty_properties_are_skipped() {
        let mut props = Properties::new();
        props.insert("Name".into(), PropertyValue::Title { title: vec![] });
        props.insert("Due".into(), PropertyValue::Date { date: None });
        props.insert("Link".into(), PropertyValue::Url { url: None });
        assert_eq!(BlockToMarkdown::new().convert_properties(&props), "");
    }

    #[test]
    fn test_convert_page() {
        let mut page = Page::default();
        page.properties
            .insert("Name".into(), PropertyValue::title("Notes"));
        let blocks = vec![Block::paragraph(text("Hello"))];
        assert_eq!(
            BlockToMarkdown::new().convert_page(&page, &blocks),
            "# Notes\n\nHello\n\n"
        );
    }
}
