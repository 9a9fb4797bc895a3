use std::fmt;
use std::path::{Path, PathBuf};

/// A filesystem path guaranteed to be relative to the solution root.
///
/// Only built from registry segments, so it is never absolute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Build from path segments. Segments are trusted identifiers produced by
    /// the artifact registry, so the result is always relative.
    pub(crate) fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(segments.into_iter().map(|s| s.as_ref().to_string()).collect())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward slashes on every platform so reports are stable.
        let mut first = true;
        for component in self.0.components() {
            if !first {
                f.write_str("/")?;
            }
            first = false;
            write!(f, "{}", component.as_os_str().to_string_lossy())?;
        }
        Ok(())
    }
}

// ── Identifier helpers ────────────────────────────────────────────────────────

/// `true` for a C#-style identifier: a letter or `_`, then letters, digits or `_`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `true` for a dotted solution name such as `Shop.Api` or `my-shop`.
pub fn is_solution_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    !s.ends_with('.')
        && !s.contains("..")
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// `Product` → `product`.
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
