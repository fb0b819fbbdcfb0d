//! User-facing surfaces: terminal notices and the FLTK settings form.

pub mod dialogs;
pub mod notices;
