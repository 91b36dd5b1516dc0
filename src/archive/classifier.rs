// file: src/archive/classifier.rs
// description: per-file text/binary classification heuristics
// reference: extension tables plus null-byte ratio check

use std::path::Path;

/// Files whose null-byte share reaches this ratio are rejected as
/// non-displayable. The threshold is a heuristic constant; it makes no
/// claim of encoding validity beyond matching observed behavior.
pub const NULL_BYTE_RATIO: f64 = 0.01;

/// Known binary-format suffixes. Matching is by extension alone and never
/// inspects content, so a `.png` full of ASCII is still Binary.
pub const BINARY_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tiff", "heic",
    // archives
    "zip", "tar", "gz", "tgz", "bz2", "xz", "7z", "rar", "jar",
    // executables and shared libraries
    "exe", "dll", "so", "dylib", "bin", "msi",
    // audio and video
    "mp3", "wav", "ogg", "flac", "aac", "mp4", "avi", "mov", "mkv", "webm", "wmv",
    // fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // compiled object formats
    "o", "obj", "a", "lib", "class", "pyc", "pyo", "wasm", "rlib",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Binary,
    InvalidText,
    Text,
}

#[derive(Debug, Default)]
pub struct ContentClassifier;

impl ContentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Extension check, case-insensitive. Directories never reach this
    /// stage; the walker filters them first.
    pub fn is_binary_extension(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                BINARY_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    /// Share of literal null characters in the decoded text. Empty content
    /// is ratio zero.
    pub fn null_byte_ratio(content: &str) -> f64 {
        let total = content.chars().count();
        if total == 0 {
            return 0.0;
        }

        let nulls = content.chars().filter(|&c| c == '\0').count();
        nulls as f64 / total as f64
    }

    pub fn classify(&self, path: &str, content: &str) -> ContentKind {
        if self.is_binary_extension(path) {
            return ContentKind::Binary;
        }

        if Self::null_byte_ratio(content) >= NULL_BYTE_RATIO {
            return ContentKind::InvalidText;
        }

        ContentKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_extension_is_case_insensitive() {
        let classifier = ContentClassifier::new();

        assert!(classifier.is_binary_extension("logo.png"));
        assert!(classifier.is_binary_extension("assets/LOGO.PNG"));
        assert!(classifier.is_binary_extension("lib/native.So"));
        assert!(!classifier.is_binary_extension("src/index.js"));
        assert!(!classifier.is_binary_extension("Makefile"));
    }

    #[test]
    fn test_binary_verdict_ignores_content() {
        let classifier = ContentClassifier::new();
        // ASCII-only bytes under a binary extension stay Binary
        assert_eq!(
            classifier.classify("logo.png", "plain ascii text"),
            ContentKind::Binary
        );
    }

    #[test]
    fn test_null_ratio_boundary() {
        let classifier = ContentClassifier::new();

        // 1000 chars, 10 nulls: ratio exactly 0.01 is rejected
        let mut rejected = "a".repeat(990);
        rejected.push_str(&"\0".repeat(10));
        assert_eq!(
            classifier.classify("data.txt", &rejected),
            ContentKind::InvalidText
        );

        // 1000 chars, 9 nulls: ratio 0.009 passes
        let mut accepted = "a".repeat(991);
        accepted.push_str(&"\0".repeat(9));
        assert_eq!(
            classifier.classify("data.txt", &accepted),
            ContentKind::Text
        );
    }

    #[test]
    fn test_empty_content_is_text() {
        let classifier = ContentClassifier::new();
        assert_eq!(classifier.classify("empty.txt", ""), ContentKind::Text);
        assert_eq!(ContentClassifier::null_byte_ratio(""), 0.0);
    }

    #[test]
    fn test_plain_source_is_text() {
        let classifier = ContentClassifier::new();
        assert_eq!(
            classifier.classify("src/main.rs", "fn main() {}\n"),
            ContentKind::Text
        );
    }
}
