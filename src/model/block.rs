//! Block-level types.

use super::rich_text::{join_content, RichText};
use serde::{Deserialize, Serialize};

/// Language tag used for code blocks without one.
pub const DEFAULT_CODE_LANGUAGE: &str = "plain text";

/// One structural unit of page content.
///
/// Serializes with the block type as discriminant and the payload keyed by
/// the same name, e.g. `{"type": "heading_1", "heading_1": {"rich_text": [...]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Plain paragraph
    Paragraph {
        /// Payload
        paragraph: TextBlock,
    },

    /// Level 1 heading
    #[serde(rename = "heading_1")]
    Heading1 {
        /// Payload
        heading_1: TextBlock,
    },

    /// Level 2 heading
    #[serde(rename = "heading_2")]
    Heading2 {
        /// Payload
        heading_2: TextBlock,
    },

    /// Level 3 heading
    #[serde(rename = "heading_3")]
    Heading3 {
        /// Payload
        heading_3: TextBlock,
    },

    /// Bulleted list item
    BulletedListItem {
        /// Payload
        bulleted_list_item: TextBlock,
    },

    /// Numbered list item
    NumberedListItem {
        /// Payload
        numbered_list_item: TextBlock,
    },

    /// Checkbox item
    ToDo {
        /// Payload
        to_do: ToDoBlock,
    },

    /// Code listing
    Code {
        /// Payload
        code: CodeBlock,
    },

    /// Block quote
    Quote {
        /// Payload
        quote: TextBlock,
    },

    /// Image reference
    Image {
        /// Payload
        image: ImageBlock,
    },

    /// Any block type this crate does not model.
    ///
    /// Serializes as `{"type": "unsupported"}`, which the API rejects;
    /// [`BlockChildren::batches`](super::BlockChildren::batches) leaves these
    /// out of request bodies.
    #[serde(other)]
    Unsupported,
}

impl Block {
    /// Create a paragraph block.
    pub fn paragraph(rich_text: Vec<RichText>) -> Self {
        Block::Paragraph {
            paragraph: TextBlock::new(rich_text),
        }
    }

    /// Create a heading block.
    ///
    /// Levels 1-3 map to heading blocks; anything deeper becomes a paragraph.
    pub fn heading(level: u8, rich_text: Vec<RichText>) -> Self {
        let payload = TextBlock::new(rich_text);
        match level {
            0 | 1 => Block::Heading1 { heading_1: payload },
            2 => Block::Heading2 { heading_2: payload },
            3 => Block::Heading3 { heading_3: payload },
            _ => Block::Paragraph { paragraph: payload },
        }
    }

    /// Create a bulleted list item.
    pub fn bulleted(rich_text: Vec<RichText>) -> Self {
        Block::BulletedListItem {
            bulleted_list_item: TextBlock::new(rich_text),
        }
    }

    /// Create a numbered list item.
    pub fn numbered(rich_text: Vec<RichText>) -> Self {
        Block::NumberedListItem {
            numbered_list_item: TextBlock::new(rich_text),
        }
    }

    /// Create a to-do item.
    pub fn to_do(rich_text: Vec<RichText>, checked: bool) -> Self {
        Block::ToDo {
            to_do: ToDoBlock { rich_text, checked },
        }
    }

    /// Create a code block. A missing language falls back to
    /// [`DEFAULT_CODE_LANGUAGE`].
    pub fn code(content: impl Into<String>, language: Option<&str>) -> Self {
        Block::Code {
            code: CodeBlock::new(vec![RichText::new(content)], language),
        }
    }

    /// Create a quote block.
    pub fn quote(rich_text: Vec<RichText>) -> Self {
        Block::Quote {
            quote: TextBlock::new(rich_text),
        }
    }

    /// Create an image block pointing at an external URL.
    pub fn image(url: impl Into<String>, caption: Vec<RichText>) -> Self {
        Block::Image {
            image: ImageBlock {
                source: ImageSource::External {
                    external: FileUrl {
                        url: url.into(),
                        expiry_time: None,
                    },
                },
                caption,
            },
        }
    }

    /// Wire name of the block type.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Heading1 { .. } => "heading_1",
            Block::Heading2 { .. } => "heading_2",
            Block::Heading3 { .. } => "heading_3",
            Block::BulletedListItem { .. } => "bulleted_list_item",
            Block::NumberedListItem { .. } => "numbered_list_item",
            Block::ToDo { .. } => "to_do",
            Block::Code { .. } => "code",
            Block::Quote { .. } => "quote",
            Block::Image { .. } => "image",
            Block::Unsupported => "unsupported",
        }
    }

    /// Rich text carried by the block, if the type has any.
    pub fn rich_text(&self) -> Option<&[RichText]> {
        match self {
            Block::Paragraph { paragraph: b }
            | Block::Heading1 { heading_1: b }
            | Block::Heading2 { heading_2: b }
            | Block::Heading3 { heading_3: b }
            | Block::BulletedListItem {
                bulleted_list_item: b,
            }
            | Block::NumberedListItem {
                numbered_list_item: b,
            }
            | Block::Quote { quote: b } => Some(&b.rich_text),
            Block::ToDo { to_do } => Some(&to_do.rich_text),
            Block::Code { code } => Some(&code.rich_text),
            Block::Image { image } => Some(&image.caption),
            Block::Unsupported => None,
        }
    }

    /// Concatenated text content of the block.
    pub fn plain_text(&self) -> String {
        self.rich_text().map(join_content).unwrap_or_default()
    }

    /// Heading level (1-3) or None.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading1 { .. } => Some(1),
            Block::Heading2 { .. } => Some(2),
            Block::Heading3 { .. } => Some(3),
            _ => None,
        }
    }

    /// Check if this block renders as a Markdown list line.
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            Block::BulletedListItem { .. } | Block::NumberedListItem { .. } | Block::ToDo { .. }
        )
    }
}

/// Payload of blocks that only carry rich text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Inline content
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

impl TextBlock {
    /// Create a payload from runs.
    pub fn new(rich_text: Vec<RichText>) -> Self {
        Self { rich_text }
    }
}

/// Payload of a to-do block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToDoBlock {
    /// Inline content
    #[serde(default)]
    pub rich_text: Vec<RichText>,

    /// Whether the box is ticked
    #[serde(default)]
    pub checked: bool,
}

/// Payload of a code block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Code content
    #[serde(default)]
    pub rich_text: Vec<RichText>,

    /// Language tag
    #[serde(default = "default_language")]
    pub language: String,
}

impl CodeBlock {
    /// Create a code payload. A missing or blank language falls back to
    /// [`DEFAULT_CODE_LANGUAGE`].
    pub fn new(rich_text: Vec<RichText>, language: Option<&str>) -> Self {
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_CODE_LANGUAGE);
        Self {
            rich_text,
            language: language.to_string(),
        }
    }
}

fn default_language() -> String {
    DEFAULT_CODE_LANGUAGE.to_string()
}

/// Payload of an image block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Where the image lives
    #[serde(flatten)]
    pub source: ImageSource,

    /// Caption
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichText>,
}

impl ImageBlock {
    /// Image URL regardless of hosting.
    pub fn url(&self) -> &str {
        match &self.source {
            ImageSource::External { external } => &external.url,
            ImageSource::File { file } => &file.url,
        }
    }
}

/// Image hosting variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    /// Image hosted elsewhere
    External {
        /// Location
        external: FileUrl,
    },
    /// Image uploaded to Notion
    File {
        /// Location (signed, expiring URL)
        file: FileUrl,
    },
}

/// URL of an external or hosted file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUrl {
    /// Location
    pub url: String,

    /// Expiry of signed URLs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
}
