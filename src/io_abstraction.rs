use std::io::{self, BufRead, Write};

use crossterm::tty::IsTty;

/// Line-oriented command I/O for the demo harnesses.
pub trait CommandIo {
    /// The next command line without its terminator, or `None` at end of
    /// input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

pub struct SystemIo {
    prompt: bool,
}

impl SystemIo {
    /// Prompts only when stdin is an interactive terminal.
    pub fn new() -> Self {
        SystemIo { prompt: io::stdin().is_tty() }
    }
}

impl Default for SystemIo {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandIo for SystemIo {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.prompt {
            let mut out = io::stdout().lock();
            out.write_all(b"> ")?;
            out.flush()?;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut handle = io::stdout().lock();
        writeln!(handle, "{}", line)
    }
}

#[cfg(test)]
pub struct TestIo {
    pub input: std::collections::VecDeque<String>,
    pub output: Vec<String>,
}

#[cfg(test)]
impl TestIo {
    pub fn new() -> Self {
        Self { input: Default::default(), output: Vec::new() }
    }

    pub fn with_input(mut self, text: &str) -> Self {
        self.input = text.lines().map(str::to_string).collect();
        self
    }
}

#[cfg(test)]
impl Default for TestIo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl CommandIo for TestIo {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}
