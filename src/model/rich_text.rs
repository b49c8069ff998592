//! Inline rich text runs.

use serde::{Deserialize, Serialize};

/// A run of inline text with consistent styling.
///
/// Serializes to the Notion rich text object shape:
/// `{"type": "text", "text": {"content": "...", "link": null}, "annotations": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    /// Rich text object type
    #[serde(rename = "type", default)]
    pub kind: RichTextKind,

    /// Text payload (only meaningful for `text` runs)
    #[serde(default)]
    pub text: TextContent,

    /// Styling
    #[serde(default, skip_serializing_if = "Annotations::is_default")]
    pub annotations: Annotations,

    /// Display form supplied by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,

    /// Resolved link target supplied by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl RichText {
    /// Create a plain text run.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            text: TextContent {
                content: content.into(),
                link: None,
            },
            ..Default::default()
        }
    }

    /// Create a run with the given annotations.
    pub fn styled(content: impl Into<String>, annotations: Annotations) -> Self {
        Self {
            annotations,
            ..Self::new(content)
        }
    }

    /// Create a bold run.
    pub fn bold(content: impl Into<String>) -> Self {
        Self::styled(
            content,
            Annotations {
                bold: true,
                ..Default::default()
            },
        )
    }

    /// Create an italic run.
    pub fn italic(content: impl Into<String>) -> Self {
        Self::styled(
            content,
            Annotations {
                italic: true,
                ..Default::default()
            },
        )
    }

    /// Attach a link target.
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.text.link = Some(Link { url: url.into() });
        self
    }

    /// The run's content.
    ///
    /// Non-text runs (mentions, equations) carry no `text` payload, so their
    /// display text stands in for the content.
    pub fn content(&self) -> &str {
        match self.kind {
            RichTextKind::Text => &self.text.content,
            _ => self.plain_text.as_deref().unwrap_or(&self.text.content),
        }
    }

    /// The run's display text, derived from the content when the API did not
    /// supply one.
    pub fn plain_text(&self) -> &str {
        self.plain_text.as_deref().unwrap_or(&self.text.content)
    }

    /// Link target, if any.
    pub fn link(&self) -> Option<&str> {
        self.text.link.as_ref().map(|l| l.url.as_str())
    }

    /// Check if the run has no content.
    pub fn is_empty(&self) -> bool {
        self.content().is_empty()
    }

    /// Whether two runs can be merged into one.
    pub fn same_style(&self, other: &RichText) -> bool {
        self.kind == other.kind
            && self.annotations == other.annotations
            && self.text.link == other.text.link
    }

    /// Split the run into runs of at most `max_chars` characters each.
    ///
    /// All pieces keep the original styling and link.
    pub fn split(self, max_chars: usize) -> Vec<RichText> {
        if max_chars == 0 || self.text.content.chars().count() <= max_chars {
            return vec![self];
        }

        let chars: Vec<char> = self.text.content.chars().collect();
        chars
            .chunks(max_chars)
            .map(|chunk| RichText {
                text: TextContent {
                    content: chunk.iter().collect(),
                    link: self.text.link.clone(),
                },
                plain_text: None,
                ..self.clone()
            })
            .collect()
    }
}

/// Concatenate the content of a sequence of runs, in order, with no separator.
pub fn join_content(runs: &[RichText]) -> String {
    runs.iter().map(RichText::content).collect()
}

/// Rich text object type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RichTextKind {
    /// Plain text run
    #[default]
    Text,
    /// Mention of a page, user, date, ...
    Mention,
    /// Inline equation
    Equation,
}

/// Text payload of a rich text run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    /// The text itself
    #[serde(default)]
    pub content: String,

    /// Optional hyperlink
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

/// Hyperlink target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL
    pub url: String,
}

/// Text styling flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    /// Bold text
    #[serde(default)]
    pub bold: bool,

    /// Italic text
    #[serde(default)]
    pub italic: bool,

    /// Strikethrough text
    #[serde(default)]
    pub strikethrough: bool,

    /// Underlined text
    #[serde(default)]
    pub underline: bool,

    /// Inline code
    #[serde(default)]
    pub code: bool,

    /// Text or background color
    #[serde(default)]
    pub color: Color,
}

impl Annotations {
    /// Check if no styling is applied.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Notion text colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    GrayBackground,
    BrownBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    RedBackground,
}
