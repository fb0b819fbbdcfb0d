//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Document, metadata block, Settings)
//! - `controllers/` - Orchestration (the publish flow)
//! - `services/` - Business operations (image pass, Imgur, GitHub gists)
//! - `infrastructure/` - External integrations (vault, platform, logging, error)

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-exports for convenient external access
pub use controllers::publish::{PublishReport, Publisher};
pub use domain::{AppSettings, Document};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::vault::{FsVault, Vault};
pub use services::gist::{GistClient, PublishResult, SnippetHost};
pub use services::imgur::{ImageHost, ImgurClient};
