//! # notion-blocks
//!
//! Conversion between Markdown and Notion blocks.
//!
//! Markdown documents parse into the block objects accepted by the Notion
//! API's append-children endpoint, and block lists returned by the API render
//! back into Markdown, along with page properties.
//!
//! ## Quick Start
//!
//! ```
//! use notion_blocks::{markdown_to_blocks, render};
//!
//! let result = markdown_to_blocks("# Title\n\nHello, Notion!");
//! assert_eq!(result.blocks.len(), 2);
//! assert!(result.errors.is_none());
//!
//! let markdown = render::to_markdown(&result.blocks);
//! assert_eq!(markdown, "# Title\n\nHello, Notion!\n\n");
//! ```
//!
//! ## Features
//!
//! - **Markdown to blocks**: paragraphs, headings, list items, to-dos, code,
//!   quotes and images, with bold/italic/strikethrough/code/link runs
//! - **Partial failure**: an element that cannot convert is reported and
//!   skipped; the rest of the document still converts
//! - **Blocks to Markdown**: block lists and page properties
//! - **Wire-compatible JSON**: model types serialize to the Notion API shape
//! - **Batch conversion**: uses Rayon for many documents

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{ElementError, Error, Result};
pub use model::{
    Annotations, Block, BlockChildren, BlockList, Color, Page, Properties, PropertyValue,
    RichText,
};
pub use parser::{ConversionResult, ConversionStats, ListMode, MarkdownToBlocks, ParseOptions};
pub use render::{BlockToMarkdown, JsonFormat};

use std::path::Path;

/// Convert Markdown to blocks with default options.
///
/// # Example
///
/// ```
/// use notion_blocks::markdown_to_blocks;
///
/// let result = markdown_to_blocks("## Section\n\n- first\n- second");
/// let kinds: Vec<_> = result.blocks.iter().map(|b| b.kind()).collect();
/// assert_eq!(kinds, ["heading_2", "bulleted_list_item"]);
/// ```
pub fn markdown_to_blocks(markdown: &str) -> ConversionResult {
    MarkdownToBlocks::new().convert(markdown)
}

/// Convert Markdown to blocks with custom options.
///
/// # Example
///
/// ```
/// use notion_blocks::{markdown_to_blocks_with_options, ParseOptions};
///
/// let options = ParseOptions::new().each_item();
/// let result = markdown_to_blocks_with_options("- first\n- second", options);
/// assert_eq!(result.blocks.len(), 2);
/// ```
pub fn markdown_to_blocks_with_options(markdown: &str, options: ParseOptions) -> ConversionResult {
    MarkdownToBlocks::with_options(options).convert(markdown)
}

/// Read a Markdown file and convert it to blocks.
///
/// # Example
///
/// ```no_run
/// use notion_blocks::{convert_file, ParseOptions};
///
/// let result = convert_file("notes.md", ParseOptions::default())?;
/// for error in result.error_messages() {
///     eprintln!("{}", error);
/// }
/// # Ok::<(), notion_blocks::Error>(())
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<ConversionResult> {
    let markdown = std::fs::read_to_string(path)?;
    Ok(markdown_to_blocks_with_options(&markdown, options))
}

/// Render blocks as Markdown.
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    render::to_markdown(blocks)
}

/// Parse block JSON: a bare array or a list response.
///
/// # Example
///
/// ```
/// use notion_blocks::parse_blocks_json;
///
/// let json = r#"{"object": "list", "results": [
///     {"type": "paragraph", "paragraph": {"rich_text": [{"type": "text", "text": {"content": "Hi"}}]}}
/// ]}"#;
/// let blocks = parse_blocks_json(json)?;
/// assert_eq!(blocks[0].plain_text(), "Hi");
/// # Ok::<(), notion_blocks::Error>(())
/// ```
pub fn parse_blocks_json(json: &str) -> Result<Vec<Block>> {
    let list: BlockList = serde_json::from_str(json)?;
    Ok(list.into_blocks())
}

/// Read block JSON from a file.
pub fn read_blocks_file<P: AsRef<Path>>(path: P) -> Result<Vec<Block>> {
    let json = std::fs::read_to_string(path)?;
    parse_blocks_json(&json)
}

/// Parse a page object.
pub fn parse_page_json(json: &str) -> Result<Page> {
    Ok(serde_json::from_str(json)?)
}

/// Read a page object from a file.
pub fn read_page_file<P: AsRef<Path>>(path: P) -> Result<Page> {
    let json = std::fs::read_to_string(path)?;
    parse_page_json(&json)
}
