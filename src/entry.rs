//! Per-entry HTML fragments.
//!
//! Each file or directory on a page is one copy of the entry template with
//! its name, link target, size and icon filled in.
//!
//! ## Link Targets
//!
//! Directories, and files whose name ends with an ignored extension, link
//! into the generated tree (`curpath/name`). Every other file links to the
//! external host (`baseurl/name`). Both are plain concatenation; a base URL
//! of `http://h/` yields `http://h//x.png`.
//!
//! For local links every `./` in `curpath` becomes `/`, so with the default
//! curpath of `.` the root page links to `./sub` while pages below it link to
//! `/sub/...`.

use crate::icons::IconSet;
use crate::size::format_entry_size;
use crate::templates::{TOKEN_FILENAME, TOKEN_FILEPATH, TOKEN_IMAGE, TOKEN_SIZE};
use crate::tree::TreeNode;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::PathBuf;

/// Position of one directory page within the site, threaded through the
/// recursion. Children get a fresh context from [`RenderContext::child`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext<'a> {
    /// Prefix for links to files hosted elsewhere.
    pub baseurl: String,
    /// This directory's path within the site; also the page title.
    pub curpath: String,
    /// Where this directory's `index.html` is written.
    pub output: PathBuf,
    /// Suffixes of files that are always linked locally.
    pub ignored_extensions: &'a [String],
}

impl<'a> RenderContext<'a> {
    pub fn child(&self, name: &str) -> Self {
        Self {
            baseurl: format!("{}/{}", self.baseurl, name),
            curpath: format!("{}/{}", self.curpath, name),
            output: self.output.join(name),
            ignored_extensions: self.ignored_extensions,
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored_extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_str()))
    }

    fn local_root(&self) -> String {
        self.curpath.replace("./", "/")
    }
}

/// Where an entry's link points.
pub fn link_target(node: &TreeNode, ctx: &RenderContext) -> String {
    if node.is_directory() || ctx.is_ignored(&node.name) {
        format!("{}/{}", ctx.local_root(), node.name)
    } else {
        format!("{}/{}", ctx.baseurl, node.name)
    }
}

/// Fill the entry template for one node.
pub fn render_entry(
    template: &str,
    node: &TreeNode,
    ctx: &RenderContext,
    icons: &IconSet,
) -> String {
    let icon = STANDARD.encode(icons.resolve(&node.name, node.kind));
    template
        .replace(TOKEN_FILENAME, &node.name)
        .replace(TOKEN_FILEPATH, &link_target(node, ctx))
        .replace(TOKEN_SIZE, &format_entry_size(node))
        .replace(TOKEN_IMAGE, &icon)
}
