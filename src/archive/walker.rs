// file: src/archive/walker.rs
// description: ordered entry walk applying ignore and content filters
// reference: filter-then-emit pipeline over the decompressed entry list

use crate::archive::classifier::{ContentClassifier, ContentKind};
use crate::archive::entry::ArchiveEntry;
use crate::archive::ignore::{IgnoreSet, IGNORE_FILE_NAME};
use crate::document::DocumentSection;
use crate::pipeline::{ProgressTracker, WalkStats};
use tracing::{debug, warn};

/// Why an entry did or did not make it into the document. Computed per
/// entry, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationVerdict {
    Included(DocumentSection),
    SkippedByIgnore,
    SkippedAsBinary,
    SkippedAsInvalidText,
    SkippedByError(String),
}

pub struct ArchiveWalker {
    root_prefix: String,
    ignore: IgnoreSet,
    classifier: ContentClassifier,
}

impl ArchiveWalker {
    pub fn new(root_prefix: String, ignore: IgnoreSet) -> Self {
        Self {
            root_prefix,
            ignore,
            classifier: ContentClassifier::new(),
        }
    }

    /// Sequential pass over the entry list. Directories and the root-level
    /// ignore file are filtered before classification; every other
    /// non-directory entry receives exactly one verdict, tallied into one
    /// of the five disjoint counters. A failure on one entry never aborts
    /// the walk.
    pub fn walk(
        &self,
        entries: &[ArchiveEntry],
        progress: Option<&ProgressTracker>,
    ) -> (Vec<DocumentSection>, WalkStats) {
        let mut sections = Vec::new();
        let mut stats = WalkStats::new();

        for entry in entries {
            if entry.is_dir {
                continue;
            }

            if let Some(progress) = progress {
                progress.inc();
            }

            let Some(relative) = self.strip_root(&entry.path) else {
                warn!("Entry outside archive root, skipping: {}", entry.path);
                stats.skipped_errors += 1;
                continue;
            };

            if relative.is_empty() {
                continue;
            }

            // The ignore file itself configures the walk; it is not content.
            if relative == IGNORE_FILE_NAME {
                debug!("Skipping embedded ignore file");
                continue;
            }

            match self.evaluate(relative, &entry.bytes) {
                ClassificationVerdict::Included(section) => {
                    debug!("Included: {}", relative);
                    stats.included += 1;
                    sections.push(section);
                }
                ClassificationVerdict::SkippedByIgnore => {
                    debug!("Ignored by pattern: {}", relative);
                    stats.skipped_ignored += 1;
                }
                ClassificationVerdict::SkippedAsBinary => {
                    debug!("Binary extension: {}", relative);
                    stats.skipped_binary += 1;
                }
                ClassificationVerdict::SkippedAsInvalidText => {
                    debug!("Null-byte ratio too high: {}", relative);
                    stats.skipped_invalid_text += 1;
                }
                ClassificationVerdict::SkippedByError(message) => {
                    warn!("Failed to process {}: {}", relative, message);
                    stats.skipped_errors += 1;
                }
            }
        }

        (sections, stats)
    }

    /// Decide the fate of a single entry, in fixed order: ignore patterns,
    /// then the extension short-circuit (content is never decoded for
    /// binary-by-extension files), then UTF-8 decode, then the null-byte
    /// ratio check.
    pub fn evaluate(&self, relative_path: &str, bytes: &[u8]) -> ClassificationVerdict {
        if self.ignore.is_excluded(relative_path) {
            return ClassificationVerdict::SkippedByIgnore;
        }

        if self.classifier.is_binary_extension(relative_path) {
            return ClassificationVerdict::SkippedAsBinary;
        }

        let content = match std::str::from_utf8(bytes) {
            Ok(content) => content,
            Err(err) => {
                return ClassificationVerdict::SkippedByError(format!("invalid UTF-8: {}", err));
            }
        };

        match self.classifier.classify(relative_path, content) {
            ContentKind::InvalidText => ClassificationVerdict::SkippedAsInvalidText,
            _ => ClassificationVerdict::Included(DocumentSection::from_content(
                relative_path.to_string(),
                content,
            )),
        }
    }

    /// Patterns are expressed relative to the repository root, so the
    /// archive's single `{repo}-{branch}` top-level directory is stripped
    /// before any matching.
    fn strip_root<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.strip_prefix(&self.root_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
    }
}
