//! The main REPL implementation.

use std::io::{self, BufRead, Write};

use lantern_foundation::{Error, ErrorKind, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::{Session, SessionConfig};

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (engine, world, undo history).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL over the demo game with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize or the demo
    /// modules fail to load.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        let session = Session::demo(config)?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL with the given editor and session.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        editor.set_completions(session.completions());
        let show_banner = session.config().show_banner;
        Self {
            editor,
            session,
            show_banner,
        }
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            print_banner();
        }
        println!("{}\n", self.session.describe());

        while self.read_eval_print()? {}

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let prompt = self.session.config().prompt.clone();
        let line = match self.editor.read_line(&prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        if line.trim().is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&line);

        match self.eval(&line) {
            Ok(Some(text)) => {
                println!("{text}\n");
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                print_error(&e);
                Ok(true)
            }
        }
    }

    /// Evaluates one line of input.
    ///
    /// Returns `None` when the player asks to quit.
    ///
    /// # Errors
    ///
    /// Returns authoring errors raised while processing the command.
    pub fn eval(&mut self, line: &str) -> Result<Option<String>> {
        if is_quit(line) {
            return Ok(None);
        }
        let text = self.session.execute(line)?;
        if line.trim().eq_ignore_ascii_case("reload") {
            self.editor.set_completions(self.session.completions());
        }
        Ok(Some(text))
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "quit" | "exit" | "q")
}

/// Runs commands from `input` without an editor, writing a transcript.
///
/// Each command is echoed after the prompt, followed by its narration.
/// Authoring errors are written to the transcript and do not stop the run.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_batch<R: BufRead, O: Write>(
    session: &mut Session,
    input: R,
    mut output: O,
) -> Result<()> {
    let prompt = session.config().prompt.clone();
    writeln!(output, "{}\n", session.describe()).map_err(io_error)?;

    for line in input.lines() {
        let line = line.map_err(io_error)?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(output, "{prompt}{line}").map_err(io_error)?;
        if is_quit(&line) {
            break;
        }
        match session.execute(&line) {
            Ok(text) => writeln!(output, "{text}\n"),
            Err(e) => writeln!(output, "Error: {e}\n"),
        }
        .map_err(io_error)?;
    }
    Ok(())
}

fn io_error(e: io::Error) -> Error {
    Error::new(ErrorKind::Internal(e.to_string()))
}

fn print_error(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
}

fn print_banner() {
    println!("\x1b[1;33m");
    println!("   .-.   ");
    println!("  (   )  L A N T E R N");
    println!("   |=|   ");
    println!("  '---'  ");
    println!("\x1b[0m");
    println!("Lantern v{}", env!("CARGO_PKG_VERSION"));
    println!("Type commands to play. Try \"help\". Use Ctrl+D or \"quit\" to exit.\n");
    let _ = io::stdout().flush();
}
