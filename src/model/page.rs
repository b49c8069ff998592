//! Page and block list containers.

use super::{Block, Properties};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of blocks accepted by one append-children request.
pub const MAX_CHILDREN_PER_REQUEST: usize = 100;

/// A Notion page object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Public URL of the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Page properties
    #[serde(default)]
    pub properties: Properties,
}

/// A sequence of blocks as read from JSON.
///
/// Accepts a bare array or a paginated list response
/// (`{"object": "list", "results": [...]}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockList {
    /// Bare array
    Blocks(Vec<Block>),
    /// Paginated list response
    Response {
        /// Blocks on this page of results
        results: Vec<Block>,
    },
}

impl BlockList {
    /// Take the blocks out of the container.
    pub fn into_blocks(self) -> Vec<Block> {
        match self {
            BlockList::Blocks(blocks) => blocks,
            BlockList::Response { results } => results,
        }
    }
}

/// Request body of an append-children call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockChildren {
    /// Blocks to append
    pub children: Vec<Block>,
}

impl BlockChildren {
    /// Wrap blocks in a request body.
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }

    /// Split blocks into request bodies of at most `size` blocks each.
    ///
    /// [`Block::Unsupported`] blocks cannot be sent to the API and are left
    /// out.
    pub fn batches(blocks: &[Block], size: usize) -> Result<Vec<BlockChildren>> {
        if size == 0 {
            return Err(Error::InvalidInput("batch size must be at least 1".into()));
        }
        let sendable: Vec<Block> = blocks
            .iter()
            .filter(|b| !matches!(b, Block::Unsupported))
            .cloned()
            .collect();
        if sendable.len() < blocks.len() {
            log::debug!(
                "Leaving {} unsupported blocks out of the request bodies",
                blocks.len() - sendable.len()
            );
        }
        Ok(sendable
            .chunks(size)
            .map(|chunk| BlockChildren::new(chunk.to_vec()))
            .collect())
    }
}
