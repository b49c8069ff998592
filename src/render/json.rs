//! JSON rendering for blocks and request bodies.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Block, BlockChildren};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any model value to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize blocks as a list of append-children request bodies with at most
/// `batch_size` blocks each. Unsupported blocks are left out.
pub fn to_children_json(blocks: &[Block], batch_size: usize, format: JsonFormat) -> Result<String> {
    let batches = BlockChildren::batches(blocks, batch_size)?;
    to_json(&batches, format)
}
