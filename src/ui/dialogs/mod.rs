pub mod settings_dialog;

use fltk::{app, prelude::*, window::Window};

/// Run a dialog's event loop until it is hidden or the app is quitting.
pub fn run_dialog(dialog: &Window) {
    while dialog.shown() {
        app::wait();
        if app::should_program_quit() {
            let mut d = dialog.clone();
            d.hide();
        }
    }
}
