//! Directory-tree model shared by the scan and generate stages.
//!
//! The input format is what `tree -Js` prints: a JSON array whose first
//! element is the root directory, followed by a `report` record with totals.
//!
//! ```json
//! [
//!   {"type": "directory", "name": ".", "contents": [
//!     {"type": "file", "name": "a.txt", "size": 500},
//!     {"type": "directory", "name": "sub", "contents": []}
//!   ]},
//!   {"type": "report", "directories": 1, "files": 1}
//! ]
//! ```
//!
//! Only the first element is read. Everything that the renderer relies on is
//! checked here, up front, so a bad tree fails before any page is written.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Name of the synthetic parent-directory entry on every page.
pub const PARENT_NAME: &str = "..";

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tree document is empty")]
    Empty,
    #[error("tree root '{0}' is not a directory")]
    RootNotDirectory(String),
    #[error("entry under '{0}' has an empty name")]
    EmptyName(String),
    #[error("directory name '{0}' cannot be used as a path component")]
    UnsafeName(String),
    #[error("file '{0}' has no size")]
    MissingSize(String),
}

/// Kind of a tree entry, from the JSON `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
    Link,
    #[serde(other)]
    Other,
}

/// One file or directory in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Size in bytes. Required for everything that is not a directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<TreeNode>,
}

impl TreeNode {
    pub fn directory(name: impl Into<String>, contents: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            size: None,
            contents,
        }
    }

    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            size: Some(size),
            contents: Vec::new(),
        }
    }

    /// The `..` entry prepended to every page's directory list.
    pub fn parent_link() -> Self {
        Self::directory(PARENT_NAME, Vec::new())
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Number of directories below this node, not counting itself.
    pub fn directory_count(&self) -> usize {
        self.contents
            .iter()
            .filter(|c| c.is_directory())
            .map(|c| 1 + c.directory_count())
            .sum()
    }

    /// Number of non-directory entries below this node.
    pub fn file_count(&self) -> usize {
        self.contents
            .iter()
            .map(|c| {
                if c.is_directory() {
                    c.file_count()
                } else {
                    1
                }
            })
            .sum()
    }
}

/// Parse a tree document and validate it for rendering.
pub fn parse_tree(json: &str) -> Result<TreeNode, TreeError> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let first = records.into_iter().next().ok_or(TreeError::Empty)?;
    let root: TreeNode = serde_json::from_value(first)?;

    if !root.is_directory() {
        return Err(TreeError::RootNotDirectory(root.name));
    }
    validate_children(&root)?;
    Ok(root)
}

/// Read and parse a tree document from disk.
pub fn load_tree(path: &Path) -> Result<TreeNode, TreeError> {
    let content = std::fs::read_to_string(path)?;
    parse_tree(&content)
}

/// Directory names become output directories, so they must be single,
/// non-traversing path components. File names only end up in page text and
/// link suffixes and are taken as they are.
fn validate_children(dir: &TreeNode) -> Result<(), TreeError> {
    for child in &dir.contents {
        if child.name.is_empty() {
            return Err(TreeError::EmptyName(dir.name.clone()));
        }
        if child.is_directory() {
            if child.name == "." || child.name == PARENT_NAME || child.name.contains(['/', '\\']) {
                return Err(TreeError::UnsafeName(child.name.clone()));
            }
            validate_children(child)?;
        } else if child.size.is_none() {
            return Err(TreeError::MissingSize(child.name.clone()));
        }
    }
    Ok(())
}
