//! Rendering module for converting blocks to Markdown and JSON.

mod json;
mod markdown;

pub use json::{to_children_json, to_json, JsonFormat};
pub use markdown::BlockToMarkdown;

use crate::model::{Block, Page, Properties};

/// Render blocks as Markdown.
pub fn to_markdown(blocks: &[Block]) -> String {
    BlockToMarkdown::new().convert(blocks)
}

/// Render page properties as Markdown.
pub fn properties_to_markdown(properties: &Properties) -> String {
    BlockToMarkdown::new().convert_properties(properties)
}

/// Render a page's properties followed by its blocks as Markdown.
pub fn page_to_markdown(page: &Page, blocks: &[Block]) -> String {
    BlockToMarkdown::new().convert_page(page, blocks)
}
