//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Document and its title
//! - Metadata block (frontmatter) editing
//! - Publishing settings

pub mod document;
pub mod frontmatter;
pub mod settings;

pub use document::Document;
pub use frontmatter::{MetadataBlock, PUBLISH_URL_KEY};
pub use settings::AppSettings;
