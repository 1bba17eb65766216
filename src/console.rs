//! Character-oriented terminal channel.
//!
//! Input is consumed one full line at a time (terminator included) and
//! handed to the processor character by character; output leaves as raw
//! bytes. Keeping this behind a trait lets tests drive the machine with
//! scripted input instead of a real terminal.

use std::io::{self, BufRead, Read, Write};

pub trait Console {
    /// Blocks until a full line (newline included) is available.
    /// Returns `None` at end of stream.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Emits a single byte on the output channel.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;
}

/// The process's own stdin and stdout.
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        // Flush pending output so a prompt is visible before we block.
        io::stdout().flush()?;

        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        io::stdout().write_all(&[byte])
    }
}

/// A console fed from a fixed script, capturing everything written.
#[derive(Debug, Default)]
pub struct Scripted {
    input: io::Cursor<Vec<u8>>,
    pub output: Vec<u8>,
}

impl Scripted {
    pub fn new(input: &str) -> Self {
        Self {
            input: io::Cursor::new(input.as_bytes().to_vec()),
            output: Vec::new(),
        }
    }
}

impl Console for Scripted {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            if self.input.read(&mut byte)? == 0 {
                break;
            }
            line.push(byte[0]);
            if byte[0] == b'\n' {
                break;
            }
        }

        if line.is_empty() {
            Ok(None)
        } else {
            String::from_utf8(line)
                .map(Some)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
        }
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);
        Ok(())
    }
}
