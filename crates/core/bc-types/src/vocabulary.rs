//! Word lists that candidate keys are composed from.

use serde::{Deserialize, Serialize};

/// The four axes of the candidate key space.
///
/// Every list is normalized on the way in: entries are trimmed, empty entries
/// are dropped and repeated entries keep only their first occurrence. Entries
/// are otherwise compared exactly as supplied, so `CSV` and `csv` are two
/// different extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Key prefixes (e.g. "backup", "export")
    pub key_prefixes: Vec<String>,

    /// Folder patterns (e.g. "documents", "reports")
    pub folder_patterns: Vec<String>,

    /// Filename tokens (e.g. "data", "report")
    pub file_names: Vec<String>,

    /// File extensions without the dot (e.g. "pdf", "csv")
    pub file_extensions: Vec<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key prefixes.
    pub fn with_key_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.key_prefixes = normalize(prefixes);
        self
    }

    /// Set the folder patterns.
    pub fn with_folder_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.folder_patterns = normalize(patterns);
        self
    }

    /// Set the filename tokens.
    pub fn with_file_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.file_names = normalize(names);
        self
    }

    /// Set the file extensions.
    ///
    /// A leading dot is stripped, so ".csv" and "csv" are the same entry.
    pub fn with_file_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.file_extensions = normalize(
            extensions
                .into_iter()
                .map(|e| e.as_ref().trim().trim_start_matches('.').to_string()),
        );
        self
    }

    /// Append another vocabulary's entries after this one's, keeping first occurrences.
    pub fn merged(&self, other: &Vocabulary) -> Vocabulary {
        Vocabulary {
            key_prefixes: normalize(self.key_prefixes.iter().chain(&other.key_prefixes)),
            folder_patterns: normalize(self.folder_patterns.iter().chain(&other.folder_patterns)),
            file_names: normalize(self.file_names.iter().chain(&other.file_names)),
            file_extensions: normalize(self.file_extensions.iter().chain(&other.file_extensions)),
        }
    }

    /// Whether every axis is empty.
    pub fn is_empty(&self) -> bool {
        self.key_prefixes.is_empty()
            && self.folder_patterns.is_empty()
            && self.file_names.is_empty()
            && self.file_extensions.is_empty()
    }
}

/// Split a comma-separated list into normalized entries.
///
/// An empty or all-whitespace input yields an empty list, which means
/// "skip this axis".
pub fn parse_list(input: &str) -> Vec<String> {
    normalize(input.split(','))
}

fn normalize<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.as_ref().trim();
        if entry.is_empty() || out.iter().any(|e| e == entry) {
            continue;
        }
        out.push(entry.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("pdf, csv ,,json"), vec!["pdf", "csv", "json"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn test_parse_list_keeps_first_occurrence() {
        assert_eq!(parse_list("b,a,b,c,a"), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_extensions_are_case_sensitive() {
        let vocab = Vocabulary::new().with_file_extensions(["CSV", "csv", ".csv"]);
        assert_eq!(vocab.file_extensions, vec!["CSV", "csv"]);
    }

    #[test]
    fn test_merged() {
        let user = Vocabulary::new()
            .with_key_prefixes(["backup"])
            .with_file_extensions(["csv"]);
        let extra = Vocabulary::new()
            .with_key_prefixes(["export", "backup"])
            .with_folder_patterns(["data"]);

        let merged = user.merged(&extra);
        assert_eq!(merged.key_prefixes, vec!["backup", "export"]);
        assert_eq!(merged.folder_patterns, vec!["data"]);
        assert_eq!(merged.file_extensions, vec!["csv"]);
        assert!(merged.file_names.is_empty());
    }

    #[test]
    fn test_is_empty() {
        assert!(Vocabulary::new().is_empty());
        assert!(!Vocabulary::new().with_file_names(["data"]).is_empty());
    }
}
