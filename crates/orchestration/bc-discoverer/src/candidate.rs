//! Candidate key generation.
//!
//! The candidate space is the fixed [`TEMPLATES`] list applied to the
//! Cartesian combinations of a [`Vocabulary`]. Generation is deterministic:
//! templates are applied in list order and each template iterates its axes
//! left to right, leftmost outermost.

use bc_types::Vocabulary;
use std::collections::HashSet;

/// One axis of the candidate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Key prefix (`{p}`)
    Prefix,
    /// Folder pattern (`{f}`)
    Folder,
    /// Filename token (`{n}`)
    Name,
}

impl Axis {
    fn words(self, vocabulary: &Vocabulary) -> &[String] {
        match self {
            Self::Prefix => &vocabulary.key_prefixes,
            Self::Folder => &vocabulary.folder_patterns,
            Self::Name => &vocabulary.file_names,
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Self::Prefix => "{p}",
            Self::Folder => "{f}",
            Self::Name => "{n}",
        }
    }
}

/// A composition template: path segments joined by `/`, optionally followed by `.{e}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Path segments, outermost first
    pub segments: &'static [Axis],

    /// Whether an extension is appended
    pub extension: bool,
}

impl Template {
    const fn new(segments: &'static [Axis], extension: bool) -> Self {
        Self {
            segments,
            extension,
        }
    }

    /// Expand this template over `vocabulary`, in iteration order.
    ///
    /// Yields nothing when any axis it uses is empty.
    pub fn expand(&self, vocabulary: &Vocabulary) -> Vec<String> {
        let mut keys = vec![String::new()];

        for (depth, axis) in self.segments.iter().enumerate() {
            let words = axis.words(vocabulary);
            let separator = if depth == 0 { "" } else { "/" };
            keys = keys
                .iter()
                .flat_map(|base| words.iter().map(move |word| format!("{base}{separator}{word}")))
                .collect();
        }

        if self.extension {
            let extensions = &vocabulary.file_extensions;
            keys = keys
                .iter()
                .flat_map(|base| extensions.iter().map(move |ext| format!("{base}.{ext}")))
                .collect();
        }

        keys
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path: Vec<&str> = self.segments.iter().map(|axis| axis.placeholder()).collect();
        write!(f, "{}", path.join("/"))?;
        if self.extension {
            write!(f, ".{{e}}")?;
        }
        Ok(())
    }
}

use Axis::{Folder as F, Name as N, Prefix as P};

/// The composition templates, in application order.
pub const TEMPLATES: &[Template] = &[
    Template::new(&[P, F], true),
    Template::new(&[F, P], true),
    Template::new(&[P, F, N], true),
    Template::new(&[F, P, N], true),
    Template::new(&[P, N], true),
    Template::new(&[F, N], true),
    Template::new(&[P], true),
    Template::new(&[F], true),
    Template::new(&[N], true),
    Template::new(&[P, F], false),
    Template::new(&[F, P], false),
    Template::new(&[P, N], false),
    Template::new(&[F, N], false),
    Template::new(&[P], false),
];

/// A deduplicated candidate space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSpace {
    /// Unique candidate keys in first-generation order
    pub keys: Vec<String>,

    /// Keys produced by the templates before deduplication
    pub generated: usize,

    /// Keys dropped because an earlier template already produced them
    pub duplicates: usize,
}

impl CandidateSpace {
    /// Number of unique candidates.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether there is nothing to probe.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keep only the first `max` candidates. Returns how many were dropped.
    pub fn truncate(&mut self, max: usize) -> usize {
        let dropped = self.keys.len().saturating_sub(max);
        self.keys.truncate(max);
        dropped
    }
}

/// Generate the deduplicated candidate space for `vocabulary`.
pub fn generate_candidates(vocabulary: &Vocabulary) -> CandidateSpace {
    let mut seen: HashSet<String> = HashSet::new();
    let mut space = CandidateSpace::default();

    for template in TEMPLATES {
        for key in template.expand(vocabulary) {
            space.generated += 1;
            if seen.insert(key.clone()) {
                space.keys.push(key);
            } else {
                space.duplicates += 1;
            }
        }
    }

    space
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::new()
            .with_key_prefixes(["backup"])
            .with_folder_patterns(["data"])
            .with_file_extensions(["csv"])
    }

    #[test]
    fn test_template_display() {
        let rendered: Vec<String> = TEMPLATES.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "{p}/{f}.{e}",
                "{f}/{p}.{e}",
                "{p}/{f}/{n}.{e}",
                "{f}/{p}/{n}.{e}",
                "{p}/{n}.{e}",
                "{f}/{n}.{e}",
                "{p}.{e}",
                "{f}.{e}",
                "{n}.{e}",
                "{p}/{f}",
                "{f}/{p}",
                "{p}/{n}",
                "{f}/{n}",
                "{p}",
            ]
        );
    }

    #[test]
    fn test_both_orders_are_generated() {
        let space = generate_candidates(&vocab());

        assert_eq!(
            space.keys,
            vec![
                "backup/data.csv",
                "data/backup.csv",
                "backup.csv",
                "data.csv",
                "backup/data",
                "data/backup",
                "backup",
            ]
        );
        assert_eq!(space.generated, 7);
        assert_eq!(space.duplicates, 0);
    }

    #[test]
    fn test_leftmost_axis_is_outermost() {
        let vocabulary = Vocabulary::new()
            .with_key_prefixes(["a", "b"])
            .with_file_extensions(["x", "y"]);
        let template = Template::new(&[P], true);

        assert_eq!(template.expand(&vocabulary), vec!["a.x", "a.y", "b.x", "b.y"]);
    }

    #[test]
    fn test_empty_axis_contributes_nothing() {
        let template = Template::new(&[P, F, N], true);
        assert!(template.expand(&vocab()).is_empty());

        let only_extensions = Vocabulary::new().with_file_extensions(["csv"]);
        assert!(generate_candidates(&only_extensions).is_empty());
        assert!(generate_candidates(&Vocabulary::new()).is_empty());
    }

    #[test]
    fn test_duplicates_removed_keeping_first_occurrence() {
        // "data" as both prefix and folder makes {p}/{f} and {f}/{p} collide.
        let vocabulary = Vocabulary::new()
            .with_key_prefixes(["data"])
            .with_folder_patterns(["data"])
            .with_file_extensions(["csv"]);
        let space = generate_candidates(&vocabulary);

        assert_eq!(space.keys, vec!["data/data.csv", "data.csv", "data/data", "data"]);
        assert_eq!(space.generated, 7);
        assert_eq!(space.duplicates, 3);

        let unique: HashSet<&String> = space.keys.iter().collect();
        assert_eq!(unique.len(), space.keys.len());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let vocabulary = Vocabulary::new()
            .with_key_prefixes(["backup", "export"])
            .with_folder_patterns(["reports", "data"])
            .with_file_names(["summary", "data"])
            .with_file_extensions(["csv", "json"]);

        let first = generate_candidates(&vocabulary);
        let second = generate_candidates(&vocabulary);
        assert_eq!(first, second);
        assert_eq!(first.generated, first.len() + first.duplicates);
    }

    #[test]
    fn test_full_space_size() {
        let vocabulary = Vocabulary::new()
            .with_key_prefixes(["p1", "p2"])
            .with_folder_patterns(["f1"])
            .with_file_names(["n1", "n2", "n3"])
            .with_file_extensions(["e1", "e2"]);
        let (p, f, n, e) = (2, 1, 3, 2);

        let per_template = [
            p * f * e,
            f * p * e,
            p * f * n * e,
            f * p * n * e,
            p * n * e,
            f * n * e,
            p * e,
            f * e,
            n * e,
            p * f,
            f * p,
            p * n,
            f * n,
            p,
        ];
        let expected: usize = per_template.iter().sum();
        let space = generate_candidates(&vocabulary);
        assert_eq!(space.generated, expected);
        assert_eq!(space.duplicates, 0);
    }

    #[test]
    fn test_no_leading_slash() {
        let vocabulary = Vocabulary::new()
            .with_key_prefixes(["", " ", "logs"])
            .with_file_names(["app"])
            .with_file_extensions(["log"]);
        let space = generate_candidates(&vocabulary);

        assert!(space.keys.iter().all(|k| !k.starts_with('/') && !k.contains("//")));
        assert!(space.keys.contains(&"logs/app.log".to_string()));
    }

    #[test]
    fn test_truncate() {
        let mut space = generate_candidates(&vocab());
        assert_eq!(space.truncate(3), 4);
        assert_eq!(space.keys, vec!["backup/data.csv", "data/backup.csv", "backup.csv"]);
        assert_eq!(space.truncate(10), 0);
    }
}
