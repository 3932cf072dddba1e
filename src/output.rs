//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! ./docs/api → site/docs/api/index.html (0 dirs, 1 file)
//! ./docs → site/docs/index.html (1 dir, 1 file)
//! . → site/index.html (1 dir, 1 file)
//!
//! Generated 3 pages
//! ```
//!
//! ## Check
//!
//! ```text
//! . (2 dirs, 1 file)
//!     docs (1 dir, 1 file)
//!         api (0 dirs, 1 file)
//!     media (0 dirs, 0 files)
//!
//! 3 directories, 2 files
//! ```

use crate::generate::GeneratedPage;
use crate::tree::TreeNode;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// `(2 dirs, 1 file)` style counts.
fn entry_counts(directories: usize, files: usize) -> String {
    format!(
        "({}, {})",
        plural(directories, "dir", "dirs"),
        plural(files, "file", "files")
    )
}

// ============================================================================
// Generate output
// ============================================================================

/// One line per written page, in write order, then a summary.
pub fn format_generate_output(pages: &[GeneratedPage]) -> Vec<String> {
    let mut lines: Vec<String> = pages
        .iter()
        .map(|page| {
            format!(
                "{} → {} {}",
                page.curpath,
                page.path.display(),
                entry_counts(page.directories, page.files)
            )
        })
        .collect();
    lines.push(String::new());
    lines.push(format!("Generated {}", plural(pages.len(), "page", "pages")));
    lines
}

pub fn print_generate_output(pages: &[GeneratedPage]) {
    for line in format_generate_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Directory outline of a tree, with per-directory entry counts.
pub fn format_check_output(root: &TreeNode) -> Vec<String> {
    let mut lines = Vec::new();
    walk_directories(root, 0, &mut lines);
    lines.push(String::new());
    lines.push(format!(
        "{}, {}",
        plural(root.directory_count(), "directory", "directories"),
        plural(root.file_count(), "file", "files")
    ));
    lines
}

fn walk_directories(node: &TreeNode, depth: usize, lines: &mut Vec<String>) {
    let directories = node.contents.iter().filter(|c| c.is_directory()).count();
    let files = node.contents.len() - directories;
    lines.push(format!(
        "{}{} {}",
        indent(depth),
        node.name,
        entry_counts(directories, files)
    ));
    for child in node.contents.iter().filter(|c| c.is_directory()) {
        walk_directories(child, depth + 1, lines);
    }
}

pub fn print_check_output(root: &TreeNode) {
    for line in format_check_output(root) {
        println!("{}", line);
    }
}
