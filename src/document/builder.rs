// file: src/document/builder.rs
// description: document assembly and serialization to the output file
// reference: markdown output conventions

use crate::document::DocumentSection;
use crate::error::{PipelineError, Result};
use crate::github::RepositoryRef;
use chrono::Utc;
use std::fs;
use std::path::Path;
use tracing::info;

pub struct DocumentBuilder {
    title: String,
    branch: String,
    separator: String,
    sections: Vec<DocumentSection>,
}

impl DocumentBuilder {
    pub fn new(repo_ref: &RepositoryRef, branch: &str, separator: &str) -> Self {
        Self {
            title: repo_ref.to_string(),
            branch: branch.to_string(),
            separator: separator.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn with_sections(mut self, sections: Vec<DocumentSection>) -> Self {
        self.sections = sections;
        self
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Default artifact name when the caller does not supply one.
    pub fn default_output_name(repo_ref: &RepositoryRef, extension: &str) -> String {
        format!("{}-{}.{}", repo_ref.owner, repo_ref.repo, extension)
    }

    /// Serialize the whole document: a title section followed by one
    /// heading+body block per included file, each block terminated by the
    /// separator line.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Repository: {}\n", self.title));
        out.push_str(&format!("- Branch: {}\n", self.branch));
        out.push_str(&format!("- Generated: {}\n", Utc::now().to_rfc3339()));
        out.push_str(&format!("\n{}\n\n", self.separator));

        for section in &self.sections {
            out.push_str(&format!("## {}\n\n", section.heading));
            for line in &section.body_lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(&format!("\n{}\n\n", self.separator));
        }

        out
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                PipelineError::Serialization(format!(
                    "cannot create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        fs::write(path, self.render())?;
        info!(
            "Wrote {} sections to {}",
            self.sections.len(),
            path.display()
        );
        Ok(())
    }
}
