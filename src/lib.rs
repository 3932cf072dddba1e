//! # tree-index
//!
//! Static HTML directory listings from a JSON directory tree. Feed it the
//! output of `tree -Js` (or of `tree-index scan`) and it writes one
//! `index.html` per directory, mirroring the tree, with file icons,
//! human-readable sizes and a `..` link on every page.
//!
//! # Pipeline
//!
//! ```text
//! tree.json  →  TreeNode  →  site/**/index.html
//!   parse         render depth-first, write
//! ```
//!
//! Everything the renderer needs is validated up front: the tree when it is
//! parsed, templates and icons when they are loaded. A bad input or a broken
//! share directory therefore fails before any page is written. Output errors
//! abort at the point of failure and leave already written pages in place.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tree`] | Tree model, `tree -Js` parsing and validation |
//! | [`scan`] | Builds a tree from a real directory |
//! | [`icons`] | `icons.xml` loading and suffix-based icon selection |
//! | [`size`] | Binary unit size formatting |
//! | [`templates`] | Page templates and placeholder tokens |
//! | [`entry`] | Per-entry fragments and link targets |
//! | [`generate`] | Recursive page assembly and writing |
//! | [`config`] | Layered TOML configuration |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Templates On Disk
//!
//! Page layout lives in plain HTML files with `#TOKEN` placeholders in a
//! share directory, not in the binary. Restyling a listing means editing a
//! template; nothing is recompiled. Icons are embedded into the pages as
//! base64 data, so a generated site needs no asset files of its own.
//!
//! ## Two Link Roots
//!
//! Listings often live on a different host than the files they list. Links
//! to files therefore go to a configurable base URL, while directory links
//! (and files with an ignored extension) stay within the generated tree.

pub mod config;
pub mod entry;
pub mod generate;
pub mod icons;
pub mod output;
pub mod scan;
pub mod size;
pub mod templates;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_helpers;
