//! HTML templates and their placeholder tokens.
//!
//! Pages are assembled by plain text substitution into three templates read
//! from the share directory. The templates are opaque apart from these tokens:
//!
//! | Template | Tokens |
//! |----------|--------|
//! | `index.template.html` | `#TITLE`, `#DIR`, `#GEN_DIRS`, `#GEN_FILES`, `#FOOTER` |
//! | `file.template.html` | `#FILENAME`, `#FILEPATH`, `#SIZE`, `#IMAGE` |
//! | `footer.template.html` | `#VERSION` |
//!
//! Substitution replaces every occurrence of a token, in a fixed order (see
//! [`crate::entry`] and [`crate::generate`]). Values are inserted verbatim,
//! without HTML escaping.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INDEX_TEMPLATE: &str = "index.template.html";
pub const ENTRY_TEMPLATE: &str = "file.template.html";
pub const FOOTER_TEMPLATE: &str = "footer.template.html";

pub const TOKEN_DIR: &str = "#DIR";
pub const TOKEN_TITLE: &str = "#TITLE";
pub const TOKEN_DIRS: &str = "#GEN_DIRS";
pub const TOKEN_FILES: &str = "#GEN_FILES";
pub const TOKEN_FOOTER: &str = "#FOOTER";
pub const TOKEN_VERSION: &str = "#VERSION";
pub const TOKEN_FILENAME: &str = "#FILENAME";
pub const TOKEN_FILEPATH: &str = "#FILEPATH";
pub const TOKEN_SIZE: &str = "#SIZE";
pub const TOKEN_IMAGE: &str = "#IMAGE";

#[derive(Error, Debug)]
#[error("cannot read template {}: {source}", path.display())]
pub struct TemplateError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// The three page templates, read once per run.
#[derive(Debug, Clone)]
pub struct Templates {
    /// Page skeleton: title, directory and file lists, footer slot.
    pub index: String,
    /// One table row per entry.
    pub entry: String,
    pub footer: String,
}

impl Templates {
    pub fn load(share_dir: &Path) -> Result<Self, TemplateError> {
        Ok(Self {
            index: read_template(share_dir, INDEX_TEMPLATE)?,
            entry: read_template(share_dir, ENTRY_TEMPLATE)?,
            footer: read_template(share_dir, FOOTER_TEMPLATE)?,
        })
    }
}

fn read_template(share_dir: &Path, name: &str) -> Result<String, TemplateError> {
    let path = share_dir.join(name);
    fs::read_to_string(&path).map_err(|source| TemplateError { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_share_dir;
    use tempfile::TempDir;

    #[test]
    fn loads_all_three_templates() {
        let tmp = TempDir::new().unwrap();
        write_share_dir(tmp.path());
        let templates = Templates::load(tmp.path()).unwrap();
        assert!(templates.index.contains(TOKEN_DIRS));
        assert!(templates.entry.contains(TOKEN_FILENAME));
        assert!(templates.footer.contains(TOKEN_VERSION));
    }

    #[test]
    fn missing_template_names_the_file() {
        let tmp = TempDir::new().unwrap();
        write_share_dir(tmp.path());
        fs::remove_file(tmp.path().join(FOOTER_TEMPLATE)).unwrap();

        let err = Templates::load(tmp.path()).unwrap_err();
        assert!(err.path.ends_with(FOOTER_TEMPLATE));
        assert!(err.to_string().contains("footer.template.html"));
    }

    #[test]
    fn bundled_templates_carry_every_token() {
        let share = Path::new(env!("CARGO_MANIFEST_DIR")).join("share");
        let templates = Templates::load(&share).unwrap();
        for token in [TOKEN_DIR, TOKEN_TITLE, TOKEN_DIRS, TOKEN_FILES, TOKEN_FOOTER] {
            assert!(templates.index.contains(token), "index lacks {token}");
        }
        for token in [TOKEN_FILENAME, TOKEN_FILEPATH, TOKEN_SIZE, TOKEN_IMAGE] {
            assert!(templates.entry.contains(token), "entry lacks {token}");
        }
        assert!(templates.footer.contains(TOKEN_VERSION));
    }
}
