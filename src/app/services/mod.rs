//! Services layer - operations against the note and the remote hosts.
//!
//! This module contains the business operations:
//! - Embedded image discovery and replacement
//! - Image uploads (Imgur)
//! - Gist publishing (GitHub)

pub mod gist;
pub mod http;
pub mod images;
pub mod imgur;
