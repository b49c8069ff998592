//! Conversion result with partial-failure reporting and statistics.

use crate::model::Block;
use serde::{Deserialize, Serialize};

/// Result of converting a Markdown document to blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Blocks that converted, in document order
    pub blocks: Vec<Block>,

    /// One message per element that failed to convert; None when all succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ConversionResult {
    /// Create a result, dropping the error list if it is empty.
    pub fn new(blocks: Vec<Block>, errors: Vec<String>) -> Self {
        Self {
            blocks,
            errors: (!errors.is_empty()).then_some(errors),
        }
    }

    /// Check if any element failed to convert.
    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }

    /// Error messages, empty when none.
    pub fn error_messages(&self) -> &[String] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Take the blocks, discarding errors.
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Collect statistics about the converted blocks.
    pub fn stats(&self) -> ConversionStats {
        let mut stats = ConversionStats::from_blocks(&self.blocks);
        stats.error_count = self.error_messages().len() as u32;
        stats
    }
}

/// Statistics about a block sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of headings
    pub heading_count: u32,

    /// Number of list and to-do items
    pub list_item_count: u32,

    /// Number of code blocks
    pub code_count: u32,

    /// Number of quotes
    pub quote_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Number of blocks of unmodeled types
    pub unsupported_count: u32,

    /// Number of elements that failed to convert
    pub error_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the blocks of a sequence.
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let mut stats = Self::new();
        for block in blocks {
            stats.add_block(block);
        }
        stats
    }

    /// Add a block to the statistics.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph { .. } => self.paragraph_count += 1,
            Block::Heading1 { .. } | Block::Heading2 { .. } | Block::Heading3 { .. } => {
                self.heading_count += 1
            }
            Block::BulletedListItem { .. }
            | Block::NumberedListItem { .. }
            | Block::ToDo { .. } => self.list_item_count += 1,
            Block::Code { .. } => self.code_count += 1,
            Block::Quote { .. } => self.quote_count += 1,
            Block::Image { .. } => self.image_count += 1,
            Block::Unsupported => self.unsupported_count += 1,
        }
        self.count_text(&block.plain_text());
    }

    /// Count words and characters in text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Total number of blocks counted.
    pub fn block_count(&self) -> u32 {
        self.paragraph_count
            + self.heading_count
            + self.list_item_count
            + self.code_count
            + self.quote_count
            + self.image_count
            + self.unsupported_count
    }
}
