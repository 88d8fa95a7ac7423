//! The byte source feeding the scanners.
//!
//! A [`Reader`] wraps either a borrowed slice or a blocking [`io::Read`]
//! stream and hands out one byte at a time, with a small protection facility:
//! `protect` marks the current position, and until `reset` the marked window
//! is guaranteed stable, so string and number scanners can deliver slices of
//! it without copying. The end of input is signalled with a `0` byte.

use std::borrow::Cow;
use std::io;

const BLOCK: usize = 4096;

pub struct Reader<'a> {
    buf: Cow<'a, [u8]>,
    src: Option<Box<dyn io::Read + 'a>>,
    /// Index of the next unread byte.
    tail: usize,
    /// Start of the protected window, when one is active.
    pro: Option<usize>,
    eof: bool,
    line: usize,
    col: usize,
    /// Position of the byte most recently handed out.
    at_line: usize,
    at_col: usize,
}

impl<'a> Reader<'a> {
    pub fn from_str(input: &'a str) -> Self {
        Self::from_slice(input.as_bytes())
    }

    pub fn from_slice(input: &'a [u8]) -> Self {
        Self {
            buf: Cow::Borrowed(input),
            src: None,
            tail: 0,
            pro: None,
            eof: true,
            line: 1,
            col: 1,
            at_line: 1,
            at_col: 1,
        }
    }

    /// Wraps a blocking stream. Bytes are pulled in blocks as the scanners
    /// consume them; consumed input is compacted away at document
    /// boundaries.
    pub fn from_read(src: impl io::Read + 'a) -> Self {
        Self {
            buf: Cow::Owned(Vec::new()),
            src: Some(Box::new(src)),
            tail: 0,
            pro: None,
            eof: false,
            line: 1,
            col: 1,
            at_line: 1,
            at_col: 1,
        }
    }

    fn fill(&mut self) -> bool {
        let Some(src) = self.src.as_mut() else {
            self.eof = true;
            return false;
        };
        let buf = self.buf.to_mut();
        let start = buf.len();
        buf.resize(start + BLOCK, 0);
        loop {
            match src.read(&mut buf[start..]) {
                Ok(0) => {
                    buf.truncate(start);
                    self.eof = true;
                    return false;
                }
                Ok(n) => {
                    buf.truncate(start + n);
                    return true;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(_) => {
                    buf.truncate(start);
                    self.eof = true;
                    return false;
                }
            }
        }
    }

    /// Next byte, or `0` at end of input. A literal NUL in the input acts
    /// as the end-of-input sentinel and is never consumed.
    pub fn get(&mut self) -> u8 {
        if self.tail >= self.buf.len() && (self.eof || !self.fill()) {
            self.at_line = self.line;
            self.at_col = self.col;
            return 0;
        }
        let c = self.buf[self.tail];
        if c == 0 {
            self.at_line = self.line;
            self.at_col = self.col;
            return 0;
        }
        self.tail += 1;
        self.at_line = self.line;
        self.at_col = self.col;
        if c == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        c
    }

    /// Next byte after any whitespace, or `0` at end of input.
    pub fn next_non_white(&mut self) -> u8 {
        loop {
            match self.get() {
                b' ' | b'\t' | b'\r' | b'\n' | 0x0c => {}
                c => return c,
            }
        }
    }

    /// Consumes exactly the bytes of `s`; `false` on the first mismatch.
    pub fn expect(&mut self, s: &[u8]) -> bool {
        s.iter().all(|&b| self.get() == b)
    }

    /// Steps back over the byte just consumed.
    pub fn backup(&mut self) {
        if self.tail == 0 {
            return;
        }
        self.tail -= 1;
        if self.buf[self.tail] == b'\n' {
            self.line -= 1;
            let line_start = self.buf[..self.tail]
                .iter()
                .rposition(|&b| b == b'\n')
                .map_or(0, |p| p + 1);
            self.col = self.tail - line_start + 1;
        } else if self.col > 1 {
            self.col -= 1;
        }
    }

    /// Marks the current position as the start of a stable window.
    pub fn protect(&mut self) {
        self.pro = Some(self.tail);
    }

    /// Marks a window that begins at the byte already consumed.
    pub(crate) fn protect_prev(&mut self) {
        self.pro = Some(self.tail.saturating_sub(1));
    }

    /// Releases the window.
    pub fn reset(&mut self) {
        self.pro = None;
    }

    /// The protected bytes read so far; empty when nothing is protected.
    pub fn window(&self) -> &[u8] {
        &self.buf[self.pro.unwrap_or(self.tail)..self.tail]
    }

    pub(crate) fn window_range(&self) -> (usize, usize) {
        (self.pro.unwrap_or(self.tail), self.tail)
    }

    pub(crate) fn window_str(&self) -> &str {
        std::str::from_utf8(self.window()).unwrap_or("")
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &[u8] {
        &self.buf[start..end]
    }

    /// Drops consumed stream input. Only meaningful between documents: the
    /// caller must not hold window ranges across this call.
    pub(crate) fn compact(&mut self) {
        if self.pro.is_some() || self.src.is_none() || self.tail < BLOCK {
            return;
        }
        if let Cow::Owned(buf) = &mut self.buf {
            buf.drain(..self.tail);
            self.tail = 0;
        }
    }

    /// An error stamped with the position of the last byte handed out.
    pub fn error(&self, kind: crate::error::ErrorKind) -> crate::error::Error {
        crate::error::Error {
            kind,
            line: self.at_line,
            column: self.at_col,
        }
    }
}
