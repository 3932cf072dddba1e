//! Filesystem scanning.
//!
//! Builds the same tree document `tree -Js` prints, straight from a
//! directory, so a listing can be generated without the `tree` tool:
//!
//! ```text
//! tree-index scan /srv/files > tree.json
//! tree-index tree.json -b https://files.example
//! ```
//!
//! ## Rules
//!
//! - Entries are sorted by file name, like `tree` without sort flags.
//! - Hidden entries (leading `.`) are skipped.
//! - Files carry `size`; directories carry `contents`.
//! - A symlink to a file becomes a `link` entry with the target's size.
//!   Other symlinks (to directories, or dangling) are skipped, which also
//!   keeps cyclic links from recursing forever.
//!
//! The root node is named by the path as given, which is what `tree` does.

use crate::tree::{NodeKind, TreeNode};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// The trailing totals record of a `tree -J` document.
#[derive(Debug, Serialize)]
struct Report {
    #[serde(rename = "type")]
    kind: &'static str,
    directories: usize,
    files: usize,
}

/// Scan `root` into a tree.
pub fn scan(root: &Path) -> Result<TreeNode, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    let contents = scan_directory(root)?;
    Ok(TreeNode::directory(root.to_string_lossy(), contents))
}

/// Serialize a tree as a `tree -J` document: the root followed by a report.
pub fn to_tree_json(root: &TreeNode) -> Result<String, ScanError> {
    let report = Report {
        kind: "report",
        directories: root.directory_count(),
        files: root.file_count(),
    };
    let document = (root, report);
    Ok(serde_json::to_string_pretty(&document)?)
}

fn scan_directory(path: &Path) -> Result<Vec<TreeNode>, ScanError> {
    let mut nodes = Vec::new();

    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        let file_type = entry.file_type();
        if file_type.is_dir() {
            nodes.push(TreeNode::directory(name, scan_directory(entry.path())?));
        } else if file_type.is_symlink() {
            // Follows the link; errors mean it dangles
            match fs::metadata(entry.path()) {
                Ok(target) if target.is_file() => nodes.push(TreeNode {
                    kind: NodeKind::Link,
                    ..TreeNode::file(name, target.len())
                }),
                _ => {}
            }
        } else {
            nodes.push(TreeNode::file(name, entry.metadata()?.len()));
        }
    }

    Ok(nodes)
}
