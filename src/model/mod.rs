//! Notion content model.
//!
//! These types mirror the block, rich text and page property objects of the
//! Notion REST API. Field names serialize verbatim so values produced here can
//! be sent to the API as-is, and API responses deserialize into them.

mod block;
mod page;
mod property;
mod rich_text;

pub use block::{
    Block, CodeBlock, FileUrl, ImageBlock, ImageSource, TextBlock, ToDoBlock,
    DEFAULT_CODE_LANGUAGE,
};
pub use page::{BlockChildren, BlockList, Page, MAX_CHILDREN_PER_REQUEST};
pub use property::{DateValue, Properties, PropertyValue};
pub use rich_text::{join_content, Annotations, Color, Link, RichText, RichTextKind, TextContent};
