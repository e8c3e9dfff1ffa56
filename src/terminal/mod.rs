/**
 * Terminal Input
 * 
 * Single keystrokes from the control terminal (crossterm key events,
 * or plain bytes when input is piped), the raw-mode guard, and a
 * writer that keeps output lines aligned while the terminal is raw.
 */

pub mod raw_mode;

pub use raw_mode::{CrosstermMode, RawModeGuard, TerminalMode};

use std::io::{self, Read, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::{Result, TeleopError};

/// Reported for keys with no single-byte form (arrows, F-keys, non-ASCII)
pub const UNBOUND_KEY: u8 = 0x00;

/// Source of keystrokes, one byte per call
pub trait KeyReader {
    /// Blocks for the next key. `Ok(None)` means the input was closed.
    fn read_key(&mut self) -> Result<Option<u8>>;
}

impl<K: KeyReader + ?Sized> KeyReader for Box<K> {
    fn read_key(&mut self) -> Result<Option<u8>> {
        (**self).read_key()
    }
}

/// Byte a raw terminal would deliver for this key; `None` for releases.
/// Ctrl+letter folds to its control code, so Ctrl+C becomes 0x03.
pub fn key_byte(key: &KeyEvent) -> Option<u8> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let byte = match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) && c.is_ascii_alphabetic() => {
            (c.to_ascii_uppercase() as u8) & 0x1f
        }
        KeyCode::Char(c) if c.is_ascii() => c as u8,
        KeyCode::Enter => b'\r',
        KeyCode::Tab => b'\t',
        KeyCode::Backspace => 0x7f,
        KeyCode::Esc => 0x1b,
        _ => UNBOUND_KEY,
    };
    Some(byte)
}

/// Key presses from the terminal via crossterm; needs raw mode to see
/// single keys
#[derive(Debug, Default)]
pub struct CrosstermKeyReader;

impl KeyReader for CrosstermKeyReader {
    fn read_key(&mut self) -> Result<Option<u8>> {
        loop {
            if let Event::Key(key) = event::read().map_err(TeleopError::Terminal)? {
                if let Some(byte) = key_byte(&key) {
                    return Ok(Some(byte));
                }
            }
        }
    }
}

/// Reads keys from a byte stream, for piped or scripted input
pub struct StreamKeyReader<R: Read> {
    inner: R,
}

impl<R: Read> StreamKeyReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl StreamKeyReader<io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read> KeyReader for StreamKeyReader<R> {
    fn read_key(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(TeleopError::Terminal(e)),
            }
        }
    }
}

/// Writes `\n` as `\r\n`; raw mode turns off the terminal's own translation
pub struct CrlfWriter<W: Write> {
    inner: W,
}

impl<W: Write> CrlfWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut lines = buf.split(|&b| b == b'\n');
        if let Some(first) = lines.next() {
            self.inner.write_all(first)?;
        }
        for line in lines {
            self.inner.write_all(b"\r\n")?;
            self.inner.write_all(line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
