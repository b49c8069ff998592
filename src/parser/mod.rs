//! Markdown parsing into Notion blocks.

mod autolink;
mod inline;
pub mod lexer;
mod markdown;
mod options;
mod result;

pub use inline::{collect_runs, InlineCollector};
pub use markdown::MarkdownToBlocks;
pub use options::{ListMode, ParseOptions, MAX_TEXT_LENGTH};
pub use result::{ConversionResult, ConversionStats};
