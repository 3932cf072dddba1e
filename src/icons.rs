//! Icon selection by file-name suffix.
//!
//! Icons are described by `icons.xml` in the share directory:
//!
//! ```xml
//! <icons>
//!     <icon file="image.png">
//!         <ex>.png</ex>
//!         <ex>.jpg</ex>
//!     </icon>
//!     <icon file="text.png">
//!         <ex>.txt</ex>
//!     </icon>
//! </icons>
//! ```
//!
//! `<icon>` elements must be direct children of the root element. Icons
//! nested any deeper are not read.
//!
//! Each `file` names an image under `img/`. Rules are tried in document order
//! and the first one with a matching suffix wins. Matching is a plain
//! `ends_with`, so `.png` also matches `xlogo.png` and `png` matches `apng`.
//!
//! Three images are always required next to the rule images: `back.png` for
//! the `..` entry, `folder.png` for directories and `file.png` when no rule
//! matches. All images are read once at load time, so a description that names
//! a missing image fails before anything is rendered.

use crate::tree::{NodeKind, PARENT_NAME};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DESCRIPTION_FILE: &str = "icons.xml";
pub const IMAGE_DIR: &str = "img";
pub const BACK_ICON: &str = "back.png";
pub const FOLDER_ICON: &str = "folder.png";
pub const FILE_ICON: &str = "file.png";

#[derive(Error, Debug)]
pub enum IconError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid icon description {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },
}

#[derive(Debug, Deserialize)]
struct IconsDocument {
    #[serde(rename = "icon", default)]
    icons: Vec<IconElement>,
}

#[derive(Debug, Deserialize)]
struct IconElement {
    #[serde(rename = "@file")]
    file: String,
    #[serde(rename = "ex", default)]
    extensions: Vec<String>,
}

/// One `<icon>` element with its image loaded.
#[derive(Debug, Clone)]
pub struct IconRule {
    pub file: String,
    pub extensions: Vec<String>,
    pub image: Vec<u8>,
}

impl IconRule {
    pub fn matches(&self, name: &str) -> bool {
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

/// The immutable icon table used for a whole rendering pass.
#[derive(Debug, Clone)]
pub struct IconSet {
    rules: Vec<IconRule>,
    back: Vec<u8>,
    folder: Vec<u8>,
    file: Vec<u8>,
}

impl IconSet {
    /// Load `icons.xml` and every image it references from `share_dir`.
    pub fn load(share_dir: &Path) -> Result<Self, IconError> {
        let description_path = share_dir.join(DESCRIPTION_FILE);
        let xml = fs::read_to_string(&description_path).map_err(|source| IconError::Read {
            path: description_path.clone(),
            source,
        })?;
        let document: IconsDocument =
            quick_xml::de::from_str(&xml).map_err(|source| IconError::Parse {
                path: description_path,
                source,
            })?;

        let image_dir = share_dir.join(IMAGE_DIR);
        let rules = document
            .icons
            .into_iter()
            .map(|icon| {
                Ok(IconRule {
                    image: read_image(&image_dir, &icon.file)?,
                    file: icon.file,
                    // An empty suffix would match every file name
                    extensions: icon
                        .extensions
                        .into_iter()
                        .map(|ext| ext.trim().to_string())
                        .filter(|ext| !ext.is_empty())
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>, IconError>>()?;

        Ok(Self {
            rules,
            back: read_image(&image_dir, BACK_ICON)?,
            folder: read_image(&image_dir, FOLDER_ICON)?,
            file: read_image(&image_dir, FILE_ICON)?,
        })
    }

    pub fn rules(&self) -> &[IconRule] {
        &self.rules
    }

    /// First rule, in document order, whose suffixes match `name`.
    pub fn matching_rule(&self, name: &str) -> Option<&IconRule> {
        self.rules.iter().find(|rule| rule.matches(name))
    }

    /// Image bytes for an entry.
    pub fn resolve(&self, name: &str, kind: NodeKind) -> &[u8] {
        if name == PARENT_NAME {
            return &self.back;
        }
        if kind == NodeKind::Directory {
            return &self.folder;
        }
        match self.matching_rule(name) {
            Some(rule) => &rule.image,
            None => &self.file,
        }
    }
}

fn read_image(image_dir: &Path, file: &str) -> Result<Vec<u8>, IconError> {
    let path = image_dir.join(file);
    fs::read(&path).map_err(|source| IconError::Read { path, source })
}
