//! Entry modes
//!
//! Modes are serialized as octal strings: `0644`-style permissions for
//! files (low nine bits of the unix mode) and the fixed `040000` for
//! directories.

use crate::errors::{JitError, Result};

/// Directory bit as stored in tree entries.
const DIRECTORY_BITS: u32 = 0o40000;

/// Mask for the permission bits kept for files.
const PERMISSION_MASK: u32 = 0o777;

/// File or directory mode of a tree/index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryMode(u32);

impl EntryMode {
    pub const DIRECTORY: EntryMode = EntryMode(DIRECTORY_BITS);

    /// Regular file fallback when the platform exposes no unix mode.
    pub const REGULAR: EntryMode = EntryMode(0o644);

    /// Build a file mode from raw filesystem metadata, keeping only the
    /// permission bits.
    pub fn from_file_mode(raw: u32) -> Self {
        EntryMode(raw & PERMISSION_MASK)
    }

    /// Parse an octal mode string as found in tree and index lines.
    pub fn parse_octal(s: &str) -> Result<Self> {
        let bits = u32::from_str_radix(s, 8)
            .map_err(|_| JitError::malformed("entry mode", format!("invalid octal '{s}'")))?;

        Ok(EntryMode(bits))
    }

    pub fn is_directory(&self) -> bool {
        self.0 & DIRECTORY_BITS != 0
    }

    /// Permission bits suitable for `chmod`.
    pub fn permissions(&self) -> u32 {
        self.0 & PERMISSION_MASK
    }

    /// Octal wire form: `040000` for directories, zero-padded four digits
    /// for files.
    pub fn as_octal(&self) -> String {
        if self.is_directory() {
            "040000".to_string()
        } else {
            format!("{:04o}", self.0)
        }
    }
}

impl Default for EntryMode {
    fn default() -> Self {
        EntryMode::REGULAR
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_octal())
    }
}
