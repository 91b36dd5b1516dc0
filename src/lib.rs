// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod archive;
pub mod config;
pub mod document;
pub mod error;
pub mod github;
pub mod pipeline;
pub mod utils;

pub use archive::{
    root_dir_name, ArchiveEntry, ArchiveWalker, ClassificationVerdict, ContentClassifier,
    ContentKind, IgnoreSet, RepoArchive, DEFAULT_PATTERNS, IGNORE_FILE_NAME, NULL_BYTE_RATIO,
};
pub use config::{Config, FilterConfig, GithubConfig, OutputConfig};
pub use document::{split_paragraphs, DocumentBuilder, DocumentSection};
pub use error::{PipelineError, Result};
pub use github::{GithubClient, RepositoryMetadata, RepositoryRef};
pub use pipeline::{ProgressTracker, WalkStats};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _classifier = ContentClassifier::new();
        assert!(!DEFAULT_PATTERNS.is_empty());
    }
}
