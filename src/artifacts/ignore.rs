//! `.jitignore` predicate
//!
//! Line-oriented patterns read from the repository root. Blank lines and
//! `#` comments are skipped. A relative path is ignored when any pattern
//! matches it:
//!
//! - `/prefix` — rooted prefix match against the relative path
//! - wildcard (`*`, `?`) match against the basename
//! - exact relative-path match

use crate::errors::{JitError, Result};
use std::path::Path;

pub const IGNORE_FILE: &str = ".jitignore";

#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns {
    patterns: Vec<String>,
}

impl IgnorePatterns {
    /// Read patterns from `<root>/.jitignore`; absent file means no
    /// patterns.
    pub fn load(root: &Path) -> Result<IgnorePatterns> {
        let ignore_path = root.join(IGNORE_FILE);

        let text = match std::fs::read_to_string(&ignore_path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(IgnorePatterns::default());
            }
            Err(e) => return Err(JitError::io(&ignore_path, e)),
        };

        let patterns = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        Ok(IgnorePatterns { patterns })
    }

    pub fn from_patterns(patterns: Vec<String>) -> IgnorePatterns {
        IgnorePatterns { patterns }
    }

    /// Decide whether a root-relative POSIX path is ignored.
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        let basename = rel_path.rsplit('/').next().unwrap_or(rel_path);

        self.patterns.iter().any(|pattern| {
            if let Some(prefix) = pattern.strip_prefix('/') {
                if rel_path.starts_with(prefix) {
                    return true;
                }
            }

            wildcard_match(pattern, basename) || rel_path == pattern
        })
    }
}

/// Minimal shell-style wildcard match: `*` spans any run of characters,
/// `?` exactly one. Sufficient for basename patterns like `*.log`.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();

    // dp[i][j]: pattern[..i] matches name[..j]
    let mut dp = vec![vec![false; n.len() + 1]; p.len() + 1];
    dp[0][0] = true;

    for i in 1..=p.len() {
        if p[i - 1] == '*' {
            dp[i][0] = dp[i - 1][0];
        }
    }

    for i in 1..=p.len() {
        for j in 1..=n.len() {
            dp[i][j] = match p[i - 1] {
                '*' => dp[i - 1][j] || dp[i][j - 1],
                '?' => dp[i - 1][j - 1],
                c => dp[i - 1][j - 1] && c == n[j - 1],
            };
        }
    }

    dp[p.len()][n.len()]
}
