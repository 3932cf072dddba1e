//! Human-readable file sizes with binary unit scaling.
//!
//! Thresholds are strict: a value is only scaled up once it is *larger* than
//! the unit, so exactly 1024 bytes stays `1024 B`.
//!
//! | Bytes | Output |
//! |-------|--------|
//! | `500` | `500 B` |
//! | `1024` | `1024 B` |
//! | `1025` | `1.0 KiB` |
//! | `1536` | `1.5 KiB` |
//! | `5000` | `4.88 KiB` |
//! | `1048576` | `1024.0 KiB` |

use crate::tree::TreeNode;

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;

/// Size column value for directories.
pub const DIRECTORY_SIZE: &str = "-";

/// Format a byte count, e.g. `4.88 KiB`.
pub fn format_size(bytes: u64) -> String {
    if bytes > GIB {
        format!("{} GiB", scaled(bytes, GIB))
    } else if bytes > MIB {
        format!("{} MiB", scaled(bytes, MIB))
    } else if bytes > KIB {
        format!("{} KiB", scaled(bytes, KIB))
    } else {
        format!("{} B", bytes)
    }
}

/// Size column for an entry: directories are always `-`.
pub fn format_entry_size(node: &TreeNode) -> String {
    if node.is_directory() {
        return DIRECTORY_SIZE.to_string();
    }
    format_size(node.size.unwrap_or(0))
}

/// Divide and round to two decimals, rendered with the shortest float
/// representation that keeps at least one decimal (`1.0`, `1.5`, `4.88`).
///
/// Rounding goes through exact decimal formatting, which breaks ties to even.
fn scaled(bytes: u64, unit: u64) -> String {
    let value = bytes as f64 / unit as f64;
    let rounded: f64 = format!("{value:.2}").parse().unwrap_or(value);
    format!("{rounded:?}")
}
