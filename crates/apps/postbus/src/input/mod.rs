//! Input handling for the prompt
//!
//! Line commands mirroring the inbox page's buttons and links.

pub mod commands;
pub mod keymap;

pub use commands::{Command, parse};
pub use keymap::help_text;

use log::warn;
use std::io::{self, BufRead};

/// Read one line, `None` at end of input or on a read error
pub fn read_line<R: BufRead + ?Sized>(reader: &mut R) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(e) => {
            warn!("Failed to read input: {}", e);
            None
        }
    }
}

/// Read one line from stdin through its shared buffer
pub fn read_stdin_line() -> Option<String> {
    read_line(&mut io::stdin().lock())
}
