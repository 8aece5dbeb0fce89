//! Terminal clipboard via the OSC 52 escape sequence.

use paywiz_core::collaborators::{Clipboard, ClipboardError};
use std::io::{IsTerminal, Write};

/// Writes to the clipboard of the terminal emulator the CLI runs in.
///
/// Works over SSH as long as the emulator honours OSC 52.
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    pub fn new() -> Self {
        Self
    }
}

/// The escape sequence setting the system clipboard to `text`.
pub fn osc52_sequence(text: &str) -> String {
    let payload = fast32::base64::RFC4648.encode(text.as_bytes());
    format!("\x1b]52;c;{payload}\x07")
}

impl Clipboard for Osc52Clipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(ClipboardError::Unavailable(
                "stdout is not a terminal".to_string(),
            ));
        }
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(
            osc52_sequence("2200980205243667"),
            "\x1b]52;c;MjIwMDk4MDIwNTI0MzY2Nw==\x07"
        );
        assert_eq!(osc52_sequence("+79586841276"), "\x1b]52;c;Kzc5NTg2ODQxMjc2\x07");
    }
}
