//! Terminal clipboard access through the OSC 52 escape sequence.
//!
//! Best effort: terminals that ignore OSC 52 silently drop the request.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use crossterm::{Command, execute};
use std::fmt;
use std::io::{self, Write};

/// Crossterm command asking the terminal to place `0` on the system clipboard.
pub struct CopyToClipboard<'a>(pub &'a str);

impl Command for CopyToClipboard<'_> {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b]52;c;{}\x07", STANDARD.encode(self.0))
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "clipboard copy requires an ANSI terminal",
        ))
    }
}

pub fn copy_to_clipboard(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, CopyToClipboard(text))?;
    stdout.flush()
}
