//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Filesystem-backed vault
//! - Platform clipboard and browser
//! - Logging setup
//! - Error types

pub mod error;
pub mod logging;
pub mod platform;
pub mod vault;
