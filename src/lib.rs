//! Publish markdown notes as secret GitHub gists.
//!
//! Embedded images (`![[image.png]]`) are uploaded to Imgur and rewritten as
//! markdown image links, the note is pushed to a gist (updated in place on
//! later runs) and the gist URL is recorded in the note's frontmatter under
//! `gist-publish-url`.

pub mod app;
pub mod ui;
