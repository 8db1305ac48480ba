// Terminal presentation for the voting loop.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, queue,
    terminal::{Clear, ClearType},
};

/// Where the voting loop writes its prompts and results.
pub trait Screen {
    fn print_line(&mut self, line: &str) -> io::Result<()>;

    /// Writes a prompt, without going to the next line.
    fn prompt(&mut self, text: &str) -> io::Result<()>;

    /// Erases the last `n` lines of the display.
    fn retract_lines(&mut self, n: u16) -> io::Result<()>;

    fn clear_all(&mut self) -> io::Result<()>;
}

pub struct TerminalScreen<W: Write> {
    out: W,
}

impl TerminalScreen<Stdout> {
    pub fn stdout() -> TerminalScreen<Stdout> {
        TerminalScreen::new(io::stdout())
    }
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W) -> TerminalScreen<W> {
        TerminalScreen { out }
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    fn retract_lines(&mut self, n: u16) -> io::Result<()> {
        for _ in 0..n {
            queue!(
                self.out,
                cursor::MoveToPreviousLine(1),
                Clear(ClearType::UntilNewLine)
            )?;
        }
        self.out.flush()
    }

    fn clear_all(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        self.out.flush()
    }
}
