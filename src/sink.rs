//! Report sinks: where rendered documents end up.
//!
//! The pipeline hands every finished document to a [`ReportSink`] keyed by an
//! output identifier; the default sink writes `{key}.md` files under an
//! output directory.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable storage for rendered reports.
pub trait ReportSink {
    /// Store `document` under `key`, returning where it landed.
    fn write(&self, key: &str, document: &str) -> Result<PathBuf>;
}

/// Writes one `{key}.md` per report into a directory, creating it on first
/// use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for DirectorySink {
    fn write(&self, key: &str, document: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.md", safe_file_stem(key)));
        fs::write(&path, document)?;
        Ok(path)
    }
}

/// Reduce an arbitrary name (sheet name, mapping key) to a filesystem-safe
/// file stem: keep alphanumerics, spaces, `-` and `_`, drop the rest, strip
/// trailing whitespace.
pub fn safe_file_stem(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim_end()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_safe_file_stem() {
        assert_eq!(safe_file_stem("Sheet 1"), "Sheet 1");
        assert_eq!(safe_file_stem("Q3/Q4: Plan?"), "Q3Q4 Plan");
        assert_eq!(safe_file_stem("data_2024-08 "), "data_2024-08");
        assert_eq!(safe_file_stem("///"), "");
    }

    #[test]
    fn test_directory_sink_writes_and_creates_dir() -> Result<()> {
        let temp = tempdir().unwrap();
        let sink = DirectorySink::new(temp.path().join("reports"));

        let path = sink.write("users_table", "# Report\n")?;
        assert!(path.exists());
        assert!(path.ends_with("reports/users_table.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report\n");
        Ok(())
    }

    #[test]
    fn test_directory_sink_sanitizes_key() -> Result<()> {
        let temp = tempdir().unwrap();
        let sink = DirectorySink::new(temp.path());
        let path = sink.write("My Sheet: Final?", "x")?;
        assert!(path.ends_with("My Sheet Final.md"));
        Ok(())
    }
}
