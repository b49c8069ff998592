//! Parsing options and configuration.

/// Longest text content Notion accepts in a single rich text object.
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Options for converting Markdown to blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// How list elements map to blocks
    pub list_mode: ListMode,

    /// Split rich text runs longer than this many characters (None = never split)
    pub max_text_length: Option<usize>,

    /// Apply Unicode NFC normalization to the input
    pub normalize_unicode: bool,

    /// Whether batch conversion runs in parallel
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set list mode.
    pub fn with_list_mode(mut self, mode: ListMode) -> Self {
        self.list_mode = mode;
        self
    }

    /// Emit one block per list item.
    pub fn each_item(mut self) -> Self {
        self.list_mode = ListMode::EachItem;
        self
    }

    /// Set the rich text split length.
    pub fn with_max_text_length(mut self, max: Option<usize>) -> Self {
        self.max_text_length = max;
        self
    }

    /// Never split rich text runs.
    pub fn without_text_limit(mut self) -> Self {
        self.max_text_length = None;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Enable or disable parallel batch conversion.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch conversion.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            list_mode: ListMode::FirstItem,
            max_text_length: Some(MAX_TEXT_LENGTH),
            normalize_unicode: false,
            parallel: true,
        }
    }
}

/// How a Markdown list element maps to blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Only the first item of each list becomes a block
    #[default]
    FirstItem,
    /// Every top-level item becomes a block
    EachItem,
}
