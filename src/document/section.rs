// file: src/document/section.rs
// description: per-file document section model and paragraph splitting
// reference: internal data structures

/// One heading+body block of the output document, produced for each
/// included file and consumed immediately by the document builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSection {
    pub heading: String,
    pub body_lines: Vec<String>,
}

impl DocumentSection {
    pub fn from_content(heading: String, content: &str) -> Self {
        Self {
            heading,
            body_lines: split_paragraphs(content),
        }
    }
}

/// Split file content into body paragraphs: lines separate on either `\n`
/// or `\r\n`, and an empty line is preserved as a single-space paragraph so
/// blank separation survives serialization.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(|line| {
            if line.is_empty() {
                " ".to_string()
            } else {
                line.to_string()
            }
        })
        .collect()
}
