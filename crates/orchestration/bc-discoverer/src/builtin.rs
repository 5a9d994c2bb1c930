//! Built-in vocabulary of common folder names, file names and extensions.

use bc_types::Vocabulary;

/// Common top-level folder names.
pub const BUILTIN_FOLDERS: &[&str] = &[
    "documents", "docs", "files", "data", "backup", "backups", "images", "img", "photos",
    "pictures", "media", "videos", "audio", "music", "reports", "exports", "imports", "uploads",
    "downloads", "archive", "archives", "old", "temp", "tmp", "logs", "config", "configs",
    "settings", "public", "private", "shared", "common", "assets", "resources", "static", "db",
    "database", "sql",
];

/// Common file base names.
pub const BUILTIN_FILE_NAMES: &[&str] = &[
    "index", "main", "default", "readme", "config", "settings", "data", "backup", "export",
    "import", "report", "log", "test", "sample", "example", "template", "copy", "file",
    "document", "image", "photo", "video",
];

/// Common file extensions.
pub const BUILTIN_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "jpg", "jpeg", "png", "gif", "bmp",
    "svg", "mp4", "avi", "mov", "wmv", "flv", "mp3", "wav", "flac", "aac", "zip", "rar", "7z",
    "tar", "gz", "json", "xml", "csv", "log", "html", "css", "js", "py", "java", "cpp", "c", "sql",
    "db", "sqlite", "backup", "bak", "tmp",
];

/// The built-in vocabulary. It has no key prefixes.
pub fn builtin_vocabulary() -> Vocabulary {
    Vocabulary::new()
        .with_folder_patterns(BUILTIN_FOLDERS)
        .with_file_names(BUILTIN_FILE_NAMES)
        .with_file_extensions(BUILTIN_EXTENSIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_vocabulary() {
        let vocabulary = builtin_vocabulary();

        assert!(vocabulary.key_prefixes.is_empty());
        assert_eq!(vocabulary.folder_patterns.len(), BUILTIN_FOLDERS.len());
        assert_eq!(vocabulary.file_names.len(), BUILTIN_FILE_NAMES.len());
        assert_eq!(vocabulary.file_extensions.len(), BUILTIN_EXTENSIONS.len());
    }

    #[test]
    fn test_user_entries_come_first() {
        let user = Vocabulary::new().with_folder_patterns(["invoices", "data"]);
        let merged = user.merged(&builtin_vocabulary());

        assert_eq!(merged.folder_patterns[0], "invoices");
        assert_eq!(merged.folder_patterns[1], "data");
        assert_eq!(
            merged.folder_patterns.iter().filter(|f| *f == "data").count(),
            1
        );
    }
}
