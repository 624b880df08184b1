//! Terminal dialogs - alerts and yes/no confirmations on the console

use inbox::{ConfirmOutcome, ConfirmRequest, DialogIcon, Dialogs};
use log::warn;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use crate::input::{read_line, read_stdin_line};

type LineSource = Box<dyn FnMut() -> Option<String> + Send>;

/// Dialog provider reading answers from a line-based input
pub struct TerminalDialogs {
    input: Mutex<LineSource>,
    output: Mutex<Box<dyn Write + Send>>,
}

impl TerminalDialogs {
    /// Dialogs on stdin/stdout
    ///
    /// Answers are read through the shared stdin buffer so that lines meant
    /// for the command prompt are never swallowed.
    pub fn stdio() -> Self {
        Self::with_source(Box::new(read_stdin_line), Box::new(io::stdout()))
    }

    pub fn new(mut input: impl BufRead + Send + 'static, output: impl Write + Send + 'static) -> Self {
        Self::with_source(Box::new(move || read_line(&mut input)), Box::new(output))
    }

    fn with_source(input: LineSource, output: Box<dyn Write + Send>) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    fn write(&self, text: &str) {
        if let Ok(mut out) = self.output.lock() {
            if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
                warn!("Failed to write dialog: {}", e);
            }
        }
    }

    fn read_answer(&self) -> Option<String> {
        let mut input = self.input.lock().ok()?;
        (*input)().map(|line| line.trim().to_lowercase())
    }
}

impl Dialogs for TerminalDialogs {
    fn alert(&self, text: &str) {
        self.write(&format!("! {}\n", text));
    }

    fn confirm(&self, request: &ConfirmRequest) -> ConfirmOutcome {
        let icon = match request.icon {
            DialogIcon::Warning => "!",
        };
        self.write(&format!(
            "{} {}\n  {}\n  [j] {}  [n] {}\n> ",
            icon, request.title, request.text, request.confirm_label, request.cancel_label
        ));

        // Anything other than an explicit yes cancels, including end of input
        match self.read_answer().as_deref() {
            Some("j" | "ja" | "y" | "yes") => ConfirmOutcome::Confirmed,
            _ => ConfirmOutcome::Cancelled,
        }
    }
}
