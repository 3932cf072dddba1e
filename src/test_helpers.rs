//! Shared test utilities for the tree-index test suite.
//!
//! Provides tree builders and a throwaway share directory whose templates
//! and icons are small enough to assert on exactly.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_share_dir(tmp.path());
//! let icons = IconSet::load(tmp.path()).unwrap();
//! assert_eq!(icons.resolve("a.txt", NodeKind::File), b"text");
//! ```

use crate::config::ListingConfig;
use crate::tree::TreeNode;
use std::fs;
use std::path::Path;

// =========================================================================
// Share directory fixtures
// =========================================================================

/// Index template: `<title>`/`<h1>` carry the curpath, the two lists are
/// wrapped as `DIRS[...]` and `FILES[...]`.
pub const TEST_INDEX_TEMPLATE: &str =
    "<title>#TITLE</title><h1>#DIR</h1>DIRS[#GEN_DIRS]FILES[#GEN_FILES]#FOOTER";

/// Entry template: `<name|link|size>,` per entry.
pub const TEST_ENTRY_TEMPLATE: &str = "<#FILENAME|#FILEPATH|#SIZE>,";

pub const TEST_FOOTER_TEMPLATE: &str = "<footer>v#VERSION</footer>";

pub const TEST_ICONS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<icons>
    <icon file="image.png">
        <ex>.png</ex>
        <ex>.jpg</ex>
    </icon>
    <icon file="text.png">
        <ex>.txt</ex>
    </icon>
</icons>
"#;

/// Write a complete share directory into `dir`.
///
/// Every image's bytes are its file stem (`back`, `folder`, `file`, `image`,
/// `text`), so tests can tell which icon was picked.
pub fn write_share_dir(dir: &Path) {
    write_templates(dir);
    fs::write(dir.join("icons.xml"), TEST_ICONS_XML).unwrap();
    let img = dir.join("img");
    fs::create_dir_all(&img).unwrap();
    for stem in ["back", "folder", "file", "image", "text"] {
        fs::write(img.join(format!("{stem}.png")), stem).unwrap();
    }
}

/// Write templates, built-in icons and a custom `icons.xml`.
///
/// Each name in `images` is written under `img/` with its full file name as
/// content. Images the description references but `images` omits are left
/// missing on purpose.
pub fn write_share_dir_with_icons(dir: &Path, icons_xml: &str, images: &[&str]) {
    write_templates(dir);
    fs::write(dir.join("icons.xml"), icons_xml).unwrap();
    let img = dir.join("img");
    fs::create_dir_all(&img).unwrap();
    for stem in ["back", "folder", "file"] {
        fs::write(img.join(format!("{stem}.png")), stem).unwrap();
    }
    for name in images {
        fs::write(img.join(name), name).unwrap();
    }
}

fn write_templates(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("index.template.html"), TEST_INDEX_TEMPLATE).unwrap();
    fs::write(dir.join("file.template.html"), TEST_ENTRY_TEMPLATE).unwrap();
    fs::write(dir.join("footer.template.html"), TEST_FOOTER_TEMPLATE).unwrap();
}

/// Default config pointing at a test share directory and output root.
pub fn test_config(share_dir: &Path, output: &Path) -> ListingConfig {
    ListingConfig {
        share_dir: Some(share_dir.to_string_lossy().to_string()),
        output: output.to_string_lossy().to_string(),
        ..ListingConfig::default()
    }
}

// =========================================================================
// Trees
// =========================================================================

/// A small tree with nesting, an empty directory and mixed entry order:
///
/// ```text
/// .
/// ├── README.md
/// ├── docs/
/// │   ├── api/
/// │   │   └── index.json
/// │   └── guide.md
/// └── media/
///     ├── photo.png
///     └── empty/
/// ```
pub fn sample_tree() -> TreeNode {
    TreeNode::directory(
        ".",
        vec![
            TreeNode::file("README.md", 1830),
            TreeNode::directory(
                "docs",
                vec![
                    TreeNode::directory("api", vec![TreeNode::file("index.json", 10)]),
                    TreeNode::file("guide.md", 5000),
                ],
            ),
            TreeNode::directory(
                "media",
                vec![
                    TreeNode::file("photo.png", 204800),
                    TreeNode::directory("empty", vec![]),
                ],
            ),
        ],
    )
}
