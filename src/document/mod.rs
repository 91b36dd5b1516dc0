// file: src/document/mod.rs
// description: document assembly module exports
// reference: internal module structure

pub mod builder;
pub mod section;

pub use builder::DocumentBuilder;
pub use section::{split_paragraphs, DocumentSection};
