// file: src/archive/entry.rs
// description: zip decompression into an in-memory entry list
// reference: https://docs.rs/zip

use crate::error::Result;
use crate::github::RepositoryRef;
use std::io::{Cursor, Read};
use tracing::{debug, info};
use zip::ZipArchive;

/// One file or directory record from the downloaded snapshot. Read-only
/// once extracted.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub path: String,
    pub is_dir: bool,
    pub bytes: Vec<u8>,
}

/// The fully decompressed snapshot. The entire entry table and all file
/// contents are held in memory for the duration of a run; memory use is
/// bounded by the archive size.
pub struct RepoArchive {
    entries: Vec<ArchiveEntry>,
}

/// GitHub names the single top-level directory of a branch snapshot
/// `{repo}-{branch}`, with `/` in branch names replaced by `-`.
pub fn root_dir_name(repo_ref: &RepositoryRef, branch: &str) -> String {
    format!("{}-{}", repo_ref.repo, branch.replace('/', "-"))
}

impl RepoArchive {
    /// One synchronous pass over the zip: decompress every entry into
    /// memory, preserving archive order.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut zip = ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(zip.len());

        for index in 0..zip.len() {
            let mut file = zip.by_index(index)?;
            let path = file.name().to_string();
            let is_dir = file.is_dir();

            let mut bytes = Vec::new();
            if !is_dir {
                file.read_to_end(&mut bytes)?;
            }

            debug!("Extracted entry: {} ({} bytes)", path, bytes.len());
            entries.push(ArchiveEntry {
                path,
                is_dir,
                bytes,
            });
        }

        info!("Decompressed {} archive entries", entries.len());
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_dir).count()
    }

    /// Text of the repository-embedded ignore file at the archive root, if
    /// one exists under `{root}/{name}`.
    pub fn embedded_file_text(&self, root: &str, name: &str) -> Option<String> {
        let wanted = format!("{}/{}", root, name);
        self.entries
            .iter()
            .find(|e| !e.is_dir && e.path == wanted)
            .map(|e| String::from_utf8_lossy(&e.bytes).into_owned())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::zip_bytes;
    use super::*;

    #[test]
    fn test_from_bytes_preserves_order_and_content() {
        let bytes = zip_bytes(&[
            ("repo-main/a.txt", b"alpha"),
            ("repo-main/src/b.txt", b"beta"),
        ]);

        let archive = RepoArchive::from_bytes(bytes).unwrap();
        assert_eq!(archive.file_count(), 2);
        assert_eq!(archive.entries()[0].path, "repo-main/a.txt");
        assert_eq!(archive.entries()[0].bytes, b"alpha");
        assert_eq!(archive.entries()[1].path, "repo-main/src/b.txt");
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(RepoArchive::from_bytes(b"not a zip archive".to_vec()).is_err());
    }

    #[test]
    fn test_embedded_file_text() {
        let bytes = zip_bytes(&[
            ("repo-main/.docxignore", b"src/**\n"),
            ("repo-main/nested/.docxignore", b"other\n"),
        ]);

        let archive = RepoArchive::from_bytes(bytes).unwrap();
        let text = archive.embedded_file_text("repo-main", ".docxignore");
        assert_eq!(text.as_deref(), Some("src/**\n"));
        assert!(archive.embedded_file_text("repo-main", ".missing").is_none());
    }

    #[test]
    fn test_root_dir_name() {
        let repo_ref = RepositoryRef::parse("owner/repo").unwrap();
        assert_eq!(root_dir_name(&repo_ref, "main"), "repo-main");
        assert_eq!(root_dir_name(&repo_ref, "feature/x"), "repo-feature-x");
    }
}
