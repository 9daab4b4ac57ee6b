use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::GlobalFlags;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiPrefs {
    /// Show spinners. Only on a terminal and never in quiet mode.
    pub progress: bool,
    /// Print one line per completed bootstrap step.
    pub step_lines: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(resolve(flags, std::io::stderr().is_terminal()));
}

fn resolve(flags: &GlobalFlags, is_tty: bool) -> UiPrefs {
    UiPrefs {
        progress: is_tty && !flags.quiet,
        step_lines: !flags.quiet,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        progress: false,
        step_lines: true,
    })
}
