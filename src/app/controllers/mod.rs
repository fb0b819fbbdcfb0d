//! Controllers layer - orchestration and coordination.
//!
//! Controllers tie domain models and services together:
//! - Publishing a note end to end

pub mod publish;
