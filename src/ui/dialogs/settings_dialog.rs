use fltk::{
    button::{Button, CheckButton},
    dialog,
    enums::{Align, CallbackTrigger, Color},
    frame::Frame,
    input::{Input, SecretInput},
    prelude::*,
    window::Window,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::app::domain::settings::{AppSettings, SettingsChange};

/// Show the settings form. Every edit is saved to `path` as it happens;
/// the settings as last saved are returned when the window closes.
pub fn show_settings_dialog(current_settings: &AppSettings, path: &Path) -> AppSettings {
    let mut dialog = Window::default()
        .with_size(380, 300)
        .with_label("QuickShare Note Settings")
        .center_screen();
    dialog.make_modal(true);

    let settings = Rc::new(RefCell::new(current_settings.clone()));
    let path: Rc<PathBuf> = Rc::new(path.to_path_buf());

    // GitHub token
    Frame::default()
        .with_pos(15, 15)
        .with_size(350, 25)
        .with_label("GitHub token")
        .with_align(Align::Left | Align::Inside);
    let mut token_input = SecretInput::default().with_pos(30, 40).with_size(330, 25);
    token_input.set_value(&current_settings.github_token);
    token_input.set_trigger(CallbackTrigger::Changed);
    let mut token_hint = Frame::default().with_pos(30, 65).with_size(330, 20);
    token_hint.set_label("Needs the gist scope");
    hint_style(&mut token_hint);

    // Imgur client ID
    Frame::default()
        .with_pos(15, 95)
        .with_size(350, 25)
        .with_label("Imgur client ID")
        .with_align(Align::Left | Align::Inside);
    let mut client_input = Input::default().with_pos(30, 120).with_size(330, 25);
    client_input.set_value(&current_settings.imgur_client_id);
    client_input.set_trigger(CallbackTrigger::Changed);
    let mut client_hint = Frame::default().with_pos(30, 145).with_size(330, 20);
    client_hint.set_label("Used for uploading embedded images");
    hint_style(&mut client_hint);

    // Show frontmatter
    let mut check_frontmatter = CheckButton::default()
        .with_pos(30, 180)
        .with_size(330, 25)
        .with_label("Show frontmatter in published note");
    check_frontmatter.set_value(current_settings.show_frontmatter);

    let mut info_frame = Frame::default().with_pos(30, 210).with_size(330, 35);
    info_frame.set_label("Changes are saved immediately.");
    hint_style(&mut info_frame);

    let mut close_btn = Button::default()
        .with_pos(270, 255)
        .with_size(90, 30)
        .with_label("Close");

    dialog.end();
    dialog.show();

    let (s, p) = (settings.clone(), path.clone());
    token_input.set_callback(move |input| {
        persist(&s, &p, SettingsChange::GithubToken(input.value()));
    });

    let (s, p) = (settings.clone(), path.clone());
    client_input.set_callback(move |input| {
        persist(&s, &p, SettingsChange::ImgurClientId(input.value()));
    });

    let (s, p) = (settings.clone(), path.clone());
    check_frontmatter.set_callback(move |check| {
        persist(&s, &p, SettingsChange::ShowFrontmatter(check.value()));
    });

    let dialog_close = dialog.clone();
    close_btn.set_callback(move |_| {
        dialog_close.clone().hide();
    });

    super::run_dialog(&dialog);

    settings.borrow().clone()
}

fn persist(settings: &RefCell<AppSettings>, path: &Path, change: SettingsChange) {
    if let Err(e) = settings.borrow_mut().apply_and_save(change, path) {
        dialog::alert_default(&format!("Failed to save settings: {}", e));
    }
}

fn hint_style(frame: &mut Frame) {
    frame.set_label_size(11);
    frame.set_label_color(Color::from_rgb(100, 100, 100));
    frame.set_align(Align::Left | Align::Inside | Align::Wrap);
}
