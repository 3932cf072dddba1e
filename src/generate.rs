//! HTML site generation.
//!
//! Takes a parsed tree and writes one `index.html` per directory, mirroring
//! the tree under the output directory.
//!
//! ## Output Structure
//!
//! ```text
//! tree                         site/
//! .                            ├── index.html
//! ├── README.md                ├── releases/
//! ├── releases/                │   ├── index.html
//! │   ├── v1.0/                │   ├── v1.0/
//! │   │   └── tool.tar.gz      │   │   └── index.html
//! │   └── nightly/             │   └── nightly/
//! └── disk.img                 │       └── index.html
//! ```
//!
//! Only pages are generated. Files themselves are expected to be served from
//! the base URL, or to already sit next to the pages (ignored extensions).
//!
//! ## Page Assembly
//!
//! 1. `#DIR` and `#TITLE` in the index template become the page's curpath.
//! 2. The directory list starts with a `..` entry, on every page including
//!    the root.
//! 3. Children are visited in source order. A directory child is rendered
//!    to its own page first, then listed; other children go to the file list.
//! 4. `#GEN_DIRS` and `#GEN_FILES` receive the two lists, `#FOOTER` the footer
//!    template and finally `#VERSION` the build version.
//!
//! Rendering is deterministic, so regenerating over an existing output tree
//! rewrites every page byte for byte.

use crate::config::{self, ListingConfig};
use crate::entry::{RenderContext, render_entry};
use crate::icons::{IconError, IconSet};
use crate::templates::{
    TOKEN_DIR, TOKEN_DIRS, TOKEN_FILES, TOKEN_FOOTER, TOKEN_TITLE, TOKEN_VERSION, TemplateError,
    Templates,
};
use crate::tree::TreeNode;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const PAGE_FILE: &str = "index.html";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
    #[error("Icon error: {0}")]
    Icon(#[from] IconError),
}

/// One written page, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    /// Path of the written `index.html`.
    pub path: PathBuf,
    /// The page's curpath, as shown in its title.
    pub curpath: String,
    /// Directory entries, not counting `..`.
    pub directories: usize,
    pub files: usize,
}

/// Everything that stays fixed for a whole rendering pass.
pub struct Renderer<'a> {
    pub templates: &'a Templates,
    pub icons: &'a IconSet,
    pub version: &'a str,
}

impl Renderer<'_> {
    /// Write the page for `node` and, first, the pages of all directories
    /// below it. Pages are appended to `pages` in write order.
    pub fn render_directory(
        &self,
        node: &TreeNode,
        ctx: &RenderContext,
        pages: &mut Vec<GeneratedPage>,
    ) -> Result<(), GenerateError> {
        fs::create_dir_all(&ctx.output)?;

        let mut html = self
            .templates
            .index
            .replace(TOKEN_DIR, &ctx.curpath)
            .replace(TOKEN_TITLE, &ctx.curpath);

        let mut dirs_html = render_entry(
            &self.templates.entry,
            &TreeNode::parent_link(),
            ctx,
            self.icons,
        );
        let mut files_html = String::new();
        let mut directories = 0;
        let mut files = 0;

        for child in &node.contents {
            let fragment = if child.is_directory() {
                self.render_directory(child, &ctx.child(&child.name), pages)?;
                directories += 1;
                &mut dirs_html
            } else {
                files += 1;
                &mut files_html
            };
            fragment.push_str(&render_entry(&self.templates.entry, child, ctx, self.icons));
        }

        html = html
            .replace(TOKEN_DIRS, &dirs_html)
            .replace(TOKEN_FILES, &files_html)
            .replace(TOKEN_FOOTER, &self.templates.footer)
            .replace(TOKEN_VERSION, self.version);

        let path = ctx.output.join(PAGE_FILE);
        fs::write(&path, html)?;
        pages.push(GeneratedPage {
            path,
            curpath: ctx.curpath.clone(),
            directories,
            files,
        });
        Ok(())
    }
}

/// Render the whole site for `root` as configured.
///
/// Templates and icons are loaded before the first directory is created, so
/// a broken share directory leaves no output behind.
pub fn generate(
    root: &TreeNode,
    config: &ListingConfig,
    version: &str,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    let share_dir = config::effective_share_dir(config);
    let templates = Templates::load(&share_dir)?;
    let icons = IconSet::load(&share_dir)?;

    let renderer = Renderer {
        templates: &templates,
        icons: &icons,
        version,
    };
    let ctx = RenderContext {
        baseurl: config.baseurl.clone(),
        curpath: config::initial_curpath(config),
        output: PathBuf::from(&config.output),
        ignored_extensions: &config.ignored_extensions,
    };

    let mut pages = Vec::new();
    renderer.render_directory(root, &ctx, &mut pages)?;
    Ok(pages)
}

// ============================================================================
// Tests
// ============================================================================
