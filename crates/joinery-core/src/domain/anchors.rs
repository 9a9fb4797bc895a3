//! Anchor markers and the text splicing used by modifiers.
//!
//! Generated files carry sentinel comment lines such as
//! `// DbSets -- Do Not Delete`. A modifier finds the line whose trimmed text
//! equals the marker exactly and inserts a rendered fragment directly above
//! it. Substring matches inside other lines are ignored.
//!
//! Everything here is pure text manipulation; reading and writing the file
//! is the modifier's job.

use std::fmt;

use serde::Serialize;

use crate::domain::value_objects::ArtifactKind;

// ── Anchors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Anchor {
    Properties,
    DbSets,
    Seeders,
    DbContext,
    Policies,
    Auth,
}

impl Anchor {
    pub const ALL: [Anchor; 6] = [
        Self::Properties,
        Self::DbSets,
        Self::Seeders,
        Self::DbContext,
        Self::Policies,
        Self::Auth,
    ];

    /// The exact (trimmed) line that marks this anchor.
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Properties => "// Properties -- Do Not Delete",
            Self::DbSets => "// DbSets -- Do Not Delete",
            Self::Seeders => "// Seeders -- Do Not Delete",
            Self::DbContext => "// DbContext -- Do Not Delete",
            Self::Policies => "// Policies -- Do Not Delete",
            Self::Auth => "// Auth -- Do Not Delete",
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Properties => "Properties",
            Self::DbSets => "DbSets",
            Self::Seeders => "Seeders",
            Self::DbContext => "DbContext",
            Self::Policies => "Policies",
            Self::Auth => "Auth",
        }
    }

    fn from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        Self::ALL.into_iter().find(|a| a.marker() == trimmed)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Fragments ─────────────────────────────────────────────────────────────────

/// A piece of text a modifier splices into an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Fragment {
    /// Property declaration inside the entity or one of its DTOs.
    Property { target: ArtifactKind },
    /// `DbSet<T>` on the DbContext.
    DbSet,
    /// Seeder call in `DbSeeder`.
    Seeder,
    /// DbContext registration in `ServiceRegistration`.
    DbContextRegistration,
    /// One authorization policy in `ServiceRegistration`.
    Policy,
    /// JWT bearer setup in `ServiceRegistration`.
    JwtAuth,
}

impl Fragment {
    pub const fn anchor(&self) -> Anchor {
        match self {
            Self::Property { .. } => Anchor::Properties,
            Self::DbSet => Anchor::DbSets,
            Self::Seeder => Anchor::Seeders,
            Self::DbContextRegistration => Anchor::DbContext,
            Self::Policy => Anchor::Policies,
            Self::JwtAuth => Anchor::Auth,
        }
    }

    /// Property declarations are separated by a blank line in generated
    /// class bodies, so inserted ones keep that spacing.
    pub const fn blank_line_after(&self) -> bool {
        matches!(self, Self::Property { .. })
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property { target } => write!(f, "property ({target})"),
            Self::DbSet => f.write_str("db-set"),
            Self::Seeder => f.write_str("seeder"),
            Self::DbContextRegistration => f.write_str("db-context-registration"),
            Self::Policy => f.write_str("policy"),
            Self::JwtAuth => f.write_str("jwt-auth"),
        }
    }
}

// ── Section index ─────────────────────────────────────────────────────────────

/// Why an anchor could not be used as an insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorFault {
    Missing,
    Ambiguous { count: usize },
}

/// Line positions of every anchor marker in one file.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    entries: Vec<(Anchor, usize)>,
}

impl SectionIndex {
    pub fn build(text: &str) -> Self {
        let entries = text
            .split_inclusive('\n')
            .enumerate()
            .filter_map(|(i, line)| Anchor::from_line(line).map(|a| (a, i)))
            .collect();
        Self { entries }
    }

    /// Zero-based line number of the single occurrence of `anchor`.
    pub fn locate(&self, anchor: Anchor) -> Result<usize, AnchorFault> {
        let mut hits = self.entries.iter().filter(|(a, _)| *a == anchor);
        match (hits.next(), hits.count()) {
            (None, _) => Err(AnchorFault::Missing),
            (Some((_, line)), 0) => Ok(*line),
            (Some(_), rest) => Err(AnchorFault::Ambiguous { count: rest + 1 }),
        }
    }

    pub fn anchors(&self) -> impl Iterator<Item = Anchor> + '_ {
        self.entries.iter().map(|(a, _)| *a)
    }
}

// ── Splicing ──────────────────────────────────────────────────────────────────

/// Outcome of applying a fragment to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Splice {
    Inserted,
    AlreadyPresent,
}

fn significant_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// `true` when the non-blank lines of `fragment` already appear in `text`,
/// in order and contiguously, ignoring surrounding whitespace.
///
/// An empty fragment is always present.
pub fn contains_fragment(text: &str, fragment: &str) -> bool {
    let needle = significant_lines(fragment);
    if needle.is_empty() {
        return true;
    }
    let haystack = significant_lines(text);
    haystack.windows(needle.len()).any(|w| w == needle.as_slice())
}

/// `true` when some line of `text` declares an auto-property called `name`,
/// whatever its type, modifiers or attributes.
pub fn declares_property(text: &str, name: &str) -> bool {
    text.lines().any(|line| {
        line.trim()
            .strip_suffix("{ get; set; }")
            .and_then(|head| head.split_whitespace().last())
            .is_some_and(|declared| declared == name)
    })
}

/// Insert `fragment` immediately above line `anchor_line` of `text`.
///
/// Each fragment line is prefixed with the anchor's indentation and ends
/// with the anchor line's line ending. Leading and trailing blank lines of
/// the fragment are dropped; with `blank_line_after` a single empty line
/// separates the fragment from the anchor. All other bytes of `text` are
/// preserved.
pub fn splice_before(
    text: &str,
    anchor_line: usize,
    fragment: &str,
    blank_line_after: bool,
) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let anchor = lines.get(anchor_line).copied().unwrap_or_default();

    let indent: &str = &anchor[..anchor.len() - anchor.trim_start().len()];
    // An unterminated last line borrows the file's convention.
    let crlf = anchor.ends_with("\r\n") || (!anchor.ends_with('\n') && text.contains("\r\n"));
    let ending = if crlf { "\r\n" } else { "\n" };

    let body: Vec<&str> = fragment.lines().collect();
    let first = body.iter().position(|l| !l.trim().is_empty());
    let last = body.iter().rposition(|l| !l.trim().is_empty());

    let mut out = String::with_capacity(text.len() + fragment.len() * 2);
    for line in &lines[..anchor_line.min(lines.len())] {
        out.push_str(line);
    }
    if let (Some(first), Some(last)) = (first, last) {
        for line in &body[first..=last] {
            let line = line.trim_end();
            if !line.is_empty() {
                out.push_str(indent);
                out.push_str(line);
            }
            out.push_str(ending);
        }
        if blank_line_after {
            out.push_str(ending);
        }
    }
    for line in lines.iter().skip(anchor_line) {
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB_CONTEXT: &str = "public class ShopDbContext\n{\n    // DbSets -- Do Not Delete\n}\n";

    #[test]
    fn index_matches_whole_lines_only() {
        let text = "var x = 1; // DbSets -- Do Not Delete\n    // DbSets -- Do Not Delete\n";
        let index = SectionIndex::build(text);
        assert_eq!(index.locate(Anchor::DbSets), Ok(1));
        assert_eq!(index.locate(Anchor::Seeders), Err(AnchorFault::Missing));
    }

    #[test]
    fn duplicate_anchor_is_ambiguous() {
        let text = "// Policies -- Do Not Delete\n// Policies -- Do Not Delete\n";
        let index = SectionIndex::build(text);
        assert_eq!(
            index.locate(Anchor::Policies),
            Err(AnchorFault::Ambiguous { count: 2 })
        );
    }

    #[test]
    fn splice_inserts_above_anchor_with_its_indent() {
        let index = SectionIndex::build(DB_CONTEXT);
        let line = index.locate(Anchor::DbSets).unwrap();
        let out = splice_before(DB_CONTEXT, line, "public DbSet<Product> Products { get; set; }\n", false);
        assert_eq!(
            out,
            "public class ShopDbContext\n{\n    public DbSet<Product> Products { get; set; }\n    // DbSets -- Do Not Delete\n}\n"
        );
    }

    #[test]
    fn splice_keeps_crlf_endings() {
        let text = "{\r\n  // Seeders -- Do Not Delete\r\n}\r\n";
        let out = splice_before(text, 1, "Seed(context);", false);
        assert_eq!(out, "{\r\n  Seed(context);\r\n  // Seeders -- Do Not Delete\r\n}\r\n");
    }

    #[test]
    fn splice_preserves_relative_indentation_and_inner_blank_lines() {
        let text = "  // Auth -- Do Not Delete\n";
        let out = splice_before(text, 0, "\nif (x)\n    y();\n\nz();\n\n", false);
        assert_eq!(out, "  if (x)\n      y();\n\n  z();\n  // Auth -- Do Not Delete\n");
    }

    #[test]
    fn spaced_splice_leaves_one_blank_line_above_anchor() {
        let text = "{\n    public int Id { get; set; }\n\n    // Properties -- Do Not Delete\n}\n";
        let out = splice_before(text, 3, "public string Sku { get; set; }\n\n", true);
        assert_eq!(
            out,
            "{\n    public int Id { get; set; }\n\n    public string Sku { get; set; }\n\n    // Properties -- Do Not Delete\n}\n"
        );
        assert!(Fragment::Property { target: ArtifactKind::Entity }.blank_line_after());
        assert!(!Fragment::DbSet.blank_line_after());
    }

    #[test]
    fn fragment_detection_ignores_whitespace() {
        let text = "class A\n{\n        public string Sku { get; set; }\n    // Properties -- Do Not Delete\n}\n";
        assert!(contains_fragment(text, "public string Sku { get; set; }"));
        assert!(!contains_fragment(text, "public string Name { get; set; }"));
        assert!(contains_fragment(text, "\n\n"));
    }

    #[test]
    fn fragment_detection_requires_contiguous_lines() {
        let text = "a\nb\nc\n";
        assert!(contains_fragment(text, "b\nc"));
        assert!(!contains_fragment(text, "a\nc"));
    }

    #[test]
    fn declaration_is_found_by_name_alone() {
        let text = "    [Sieve(CanFilter = true, CanSort = false)]\n    public int ProductId { get; set; }\n";
        assert!(declares_property(text, "ProductId"));
        assert!(!declares_property(text, "Product"));
        assert!(!declares_property("// ProductId { get; set; } is generated\n", "ProductId"));
    }

    #[test]
    fn every_fragment_targets_an_anchor() {
        assert_eq!(Fragment::DbSet.anchor(), Anchor::DbSets);
        assert_eq!(
            Fragment::Property { target: ArtifactKind::DtoRead }.anchor(),
            Anchor::Properties
        );
        assert_eq!(Fragment::JwtAuth.anchor().marker(), "// Auth -- Do Not Delete");
    }
}
