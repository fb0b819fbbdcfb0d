use std::cell::Cell;
use std::io::{IsTerminal, Write};

/// User-facing status messages.
pub trait Notifier {
    /// A short message shown once.
    fn notice(&self, message: &str);

    /// A message that stays up until [`Notifier::hide_pending`].
    fn pending(&self, message: &str);

    fn hide_pending(&self);
}

/// Notices on stderr. On a terminal the pending line is erased when hidden.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    pending_shown: Cell<bool>,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for TerminalNotifier {
    fn notice(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn pending(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        if stderr.is_terminal() {
            let _ = write!(stderr, "{}", message);
            let _ = stderr.flush();
            self.pending_shown.set(true);
        } else {
            let _ = writeln!(stderr, "{}", message);
        }
    }

    fn hide_pending(&self) {
        if self.pending_shown.replace(false) {
            // Return to column 0 and clear the line.
            eprint!("\r\x1b[2K");
        }
    }
}
