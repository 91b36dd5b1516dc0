// file: src/archive/ignore.rs
// description: glob-based ignore pattern engine with layered sources
// reference: https://docs.rs/globset

use crate::error::{PipelineError, Result};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use lazy_static::lazy_static;
use tracing::debug;

/// Name of the repository-embedded ignore file expected at the archive root.
pub const IGNORE_FILE_NAME: &str = ".docxignore";

/// Built-in exclusions, applied on every run. Extension happens through the
/// repository-embedded ignore file and caller-supplied patterns, never by
/// editing this list.
pub const DEFAULT_PATTERNS: &[&str] = &[
    // version-control metadata
    ".git/**",
    ".svn/**",
    ".hg/**",
    ".gitignore",
    ".gitattributes",
    ".gitmodules",
    // dependency-manager caches and lockfiles
    "node_modules/**",
    "bower_components/**",
    "vendor/**",
    ".venv/**",
    "venv/**",
    "__pycache__/**",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
    "Gemfile.lock",
    "poetry.lock",
    "composer.lock",
    // editor and IDE directories
    ".idea/**",
    ".vscode/**",
    "*.swp",
    // build output directories
    "build/**",
    "dist/**",
    "target/**",
    "out/**",
    ".next/**",
    "coverage/**",
    // log files
    "*.log",
    "logs/**",
    // common top-level documentation files
    "README.md",
    "README",
    "LICENSE",
    "LICENSE.md",
    "LICENSE.txt",
    "CHANGELOG.md",
    "CONTRIBUTING.md",
    "CODE_OF_CONDUCT.md",
    "NOTICE",
    // OS-generated artifacts
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
];

lazy_static! {
    static ref DEFAULT_SET: GlobSet = {
        let mut builder = GlobSetBuilder::new();
        for pattern in DEFAULT_PATTERNS {
            builder.add(compile_glob(pattern).expect("built-in ignore patterns are valid"));
        }
        builder.build().expect("built-in ignore set compiles")
    };
}

/// `*` stays within one path segment; `**` crosses segment boundaries.
fn compile_glob(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| PipelineError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Union of the three pattern sources: built-in defaults, the
/// repository-embedded ignore file, and caller-supplied extras. Matching is
/// any-match and therefore independent of source order; source order only
/// shows up in diagnostics.
pub struct IgnoreSet {
    custom: GlobSet,
    custom_count: usize,
}

impl IgnoreSet {
    pub fn build(embedded: &[String], extra: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in embedded.iter().chain(extra) {
            builder.add(compile_glob(pattern)?);
        }
        let custom = builder.build().map_err(|e| PipelineError::Pattern {
            pattern: String::new(),
            message: e.to_string(),
        })?;

        debug!(
            "Compiled ignore set: {} built-in, {} embedded, {} extra",
            DEFAULT_PATTERNS.len(),
            embedded.len(),
            extra.len()
        );

        Ok(Self {
            custom,
            custom_count: embedded.len() + extra.len(),
        })
    }

    /// A path is excluded when any pattern matches the full relative path
    /// or the final path segment alone, so a bare `README.md` matches at
    /// any directory depth.
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        Self::matches(&DEFAULT_SET, relative_path) || Self::matches(&self.custom, relative_path)
    }

    fn matches(set: &GlobSet, relative_path: &str) -> bool {
        if set.is_match(relative_path) {
            return true;
        }

        match relative_path.rsplit('/').next() {
            Some(name) if name != relative_path => set.is_match(name),
            _ => false,
        }
    }

    pub fn pattern_count(&self) -> usize {
        DEFAULT_PATTERNS.len() + self.custom_count
    }

    /// Parse ignore-file text: one pattern per trimmed line, blank lines
    /// and `#` comments discarded.
    pub fn parse_ignore_text(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults_only() -> IgnoreSet {
        IgnoreSet::build(&[], &[]).unwrap()
    }

    #[test]
    fn test_builtin_patterns_exclude_expected_paths() {
        let set = defaults_only();

        assert!(set.is_excluded("node_modules/anything.js"));
        assert!(set.is_excluded(".git/HEAD"));
        assert!(set.is_excluded("build/out.js"));
        assert!(set.is_excluded("debug.log"));
        assert!(set.is_excluded("README.md"));

        assert!(!set.is_excluded("src/index.js"));
        assert!(!set.is_excluded("docs/guide.txt"));
    }

    #[test]
    fn test_bare_pattern_matches_final_segment_at_any_depth() {
        let set = defaults_only();

        assert!(set.is_excluded("docs/nested/README.md"));
        assert!(set.is_excluded("a/b/c/debug.log"));
        assert!(set.is_excluded("some/dir/.DS_Store"));
    }

    #[test]
    fn test_single_star_stays_within_segment() {
        let set = IgnoreSet::build(&[], &["src/*.tmp".to_string()]).unwrap();

        assert!(set.is_excluded("src/a.tmp"));
        assert!(!set.is_excluded("src/nested/a.tmp"));
    }

    #[test]
    fn test_double_star_crosses_segments() {
        let set = IgnoreSet::build(&["src/**".to_string()], &[]).unwrap();

        assert!(set.is_excluded("src/index.js"));
        assert!(set.is_excluded("src/deeply/nested/file.rs"));
        assert!(!set.is_excluded("other/index.js"));
    }

    #[test]
    fn test_matching_is_order_independent() {
        let embedded = vec!["*.generated".to_string()];
        let extra = vec!["secret/**".to_string()];

        let forward = IgnoreSet::build(&embedded, &extra).unwrap();
        let swapped = IgnoreSet::build(&extra, &embedded).unwrap();

        for path in [
            "a.generated",
            "nested/b.generated",
            "secret/key.pem",
            "src/main.rs",
            "README.md",
        ] {
            assert_eq!(
                forward.is_excluded(path),
                swapped.is_excluded(path),
                "verdict changed with source order for {}",
                path
            );
        }
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let result = IgnoreSet::build(&[], &["bad[pattern".to_string()]);
        assert!(matches!(result, Err(PipelineError::Pattern { .. })));
    }

    #[test]
    fn test_parse_ignore_text_skips_comments_and_blanks() {
        let text = "# generated files\n\n  *.gen  \nsrc/**\n   \n# trailing comment";
        let patterns = IgnoreSet::parse_ignore_text(text);
        assert_eq!(patterns, vec!["*.gen".to_string(), "src/**".to_string()]);
    }

    #[test]
    fn test_pattern_count_includes_all_sources() {
        let set = IgnoreSet::build(&["a/**".to_string()], &["b/**".to_string()]).unwrap();
        assert_eq!(set.pattern_count(), DEFAULT_PATTERNS.len() + 2);
    }
}
