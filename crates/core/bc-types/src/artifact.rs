//! The persisted discovered-keys list.
//!
//! Format: UTF-8 text, one object key per line, no header, no trailing
//! metadata. A fresh discovery run overwrites the whole file.

use bc_error::ArtifactError;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle to the run artifact on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArtifact {
    path: PathBuf,
}

impl RunArtifact {
    /// Create a handle for the given path. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the artifact exists as a regular file.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Replace the artifact with the given keys, in order.
    ///
    /// The keys are written to a sibling temporary file which is then renamed
    /// over the artifact, so readers see either the old list or the new one.
    pub fn write<I, S>(&self, keys: I) -> Result<usize, ArtifactError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut contents = String::new();
        let mut count = 0;
        for key in keys {
            let key = key.as_ref();
            validate_key(key)?;
            contents.push_str(key);
            contents.push('\n');
            count += 1;
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }

        let tmp_path = self.tmp_path();
        let result = (|| {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &self.path)
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.write_error(e));
        }

        debug!(path = %self.path.display(), keys = count, "Wrote run artifact");
        Ok(count)
    }

    /// Read the keys back in file order.
    ///
    /// Blank lines are ignored and a trailing `\r` is stripped from each line.
    pub fn read(&self) -> Result<Vec<String>, ArtifactError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| ArtifactError::Read {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let keys: Vec<String> = contents
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        debug!(path = %self.path.display(), keys = keys.len(), "Read run artifact");
        Ok(keys)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_error(&self, source: std::io::Error) -> ArtifactError {
        ArtifactError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }
}

fn validate_key(key: &str) -> Result<(), ArtifactError> {
    if key.trim().is_empty() {
        return Err(ArtifactError::InvalidKey {
            key: key.to_string(),
            reason: "empty key".to_string(),
        });
    }
    if key.contains('\n') || key.contains('\r') {
        return Err(ArtifactError::InvalidKey {
            key: key.to_string(),
            reason: "line break in key".to_string(),
        });
    }
    Ok(())
}
