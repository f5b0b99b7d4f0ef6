//! Line-oriented I/O ports used by `print`, `readint` and `readstr`

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Source of input lines
pub trait InputPort {
    /// Next line without its terminator, or `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Sink for output lines
pub trait OutputPort {
    /// Write `line` followed by a newline
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Input port over any buffered reader
pub struct ReaderInput<R> {
    reader: R,
}

impl<R: BufRead> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputPort for ReaderInput<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        next_line(&mut self.reader)
    }
}

fn next_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Output port over any writer
pub struct WriterOutput<W> {
    writer: W,
}

impl<W: Write> WriterOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputPort for WriterOutput<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Process standard input. The lock is taken per line so a line editor
/// sharing stdin is never blocked between reads.
#[derive(Debug, Default)]
pub struct StdInput;

impl InputPort for StdInput {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        next_line(&mut io::stdin().lock())
    }
}

/// Process standard output
pub type StdOutput = WriterOutput<io::Stdout>;

pub fn stdin() -> StdInput {
    StdInput
}

pub fn stdout() -> StdOutput {
    WriterOutput::new(io::stdout())
}

/// Pre-scripted input lines
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputPort for ScriptedInput {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Output collected in memory, one entry per `print`
#[derive(Debug, Default, Clone)]
pub struct BufferOutput {
    lines: Vec<String>,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl OutputPort for BufferOutput {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}
