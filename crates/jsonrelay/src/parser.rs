//! The parse driver: dispatch loop, scanners, and value binding.
//!
//! The driver is a flat loop over the next non-whitespace byte. Containers
//! are tracked on an explicit frame stack; only the string and number
//! scanners are inline leaf routines. After every dispatch an error aborts
//! the loop, and each time the stack empties a completed root value is
//! either retained or handed to the per-document consumer.

use crate::buf::Buf;
use crate::error::{Error, ErrorKind};
use crate::handler::{Handler, HashKey, ValueHandler};
use crate::num::{Num, NumInfo, DEC_MAX, EXP_MAX};
use crate::options::{BigDecLoad, Options};
use crate::reader::Reader;
use crate::stack::{Key, Next, ValStack};
use crate::value::Value;

/// Parses a complete document into a [`Value`] with default options.
///
/// # Examples
///
/// ```
/// use jsonrelay::parse;
///
/// let v = parse("[1, 2.5, null]").unwrap();
/// assert_eq!(v.as_array().map(Vec::len), Some(3));
/// ```
pub fn parse(json: &str) -> Result<Value, Error> {
    parse_with(json, Options::default())
}

/// Parses a complete document into a [`Value`] with explicit options.
pub fn parse_with(json: &str, options: Options) -> Result<Value, Error> {
    Parser::new(Reader::from_str(json), ValueHandler, options).parse()
}

/// A single-use parser binding a reader, a handler, and options.
pub struct Parser<'a, H: Handler> {
    rd: Reader<'a>,
    stack: ValStack<H::Value>,
    handler: H,
    options: Options,
    root: Option<H::Value>,
}

impl<'a, H: Handler> Parser<'a, H> {
    pub fn new(reader: Reader<'a>, handler: H, options: Options) -> Self {
        Self {
            rd: reader,
            stack: ValStack::new(),
            handler,
            options,
            root: None,
        }
    }

    /// Runs the parse to completion and returns the root value.
    ///
    /// Empty input yields the handler's null. When the input holds several
    /// whitespace-delimited documents the last root wins; use
    /// [`parse_documents`](Self::parse_documents) to observe each one.
    pub fn parse(mut self) -> Result<H::Value, Error> {
        self.handler.parse_start(&self.options);
        let outcome = self.drive(None);
        self.handler.parse_end();
        outcome?;
        self.check_terminated()?;
        Ok(match self.root.take() {
            Some(v) => v,
            None => self.handler.new_null(),
        })
    }

    /// Parses a stream of documents, invoking `each` once per completed
    /// root. Supports concatenated and newline-delimited documents from a
    /// single input.
    pub fn parse_documents<F>(mut self, mut each: F) -> Result<(), Error>
    where
        F: FnMut(H::Value),
    {
        self.handler.parse_start(&self.options);
        let outcome = self.drive(Some(&mut each));
        self.handler.parse_end();
        outcome?;
        self.check_terminated()
    }

    fn drive(&mut self, mut sink: Option<&mut dyn FnMut(H::Value)>) -> Result<(), Error> {
        loop {
            let c = self.rd.next_non_white();
            match c {
                b'{' => self.hash_start(),
                b'}' => self.hash_end()?,
                b':' => self.colon()?,
                b'[' => self.array_start(),
                b']' => self.array_end()?,
                b',' => self.comma()?,
                b'"' => self.read_str()?,
                b'+' | b'-' | b'0'..=b'9' | b'I' | b'N' => self.read_num(c)?,
                b't' => self.read_true()?,
                b'f' => self.read_false()?,
                b'n' => self.read_null_or_nan()?,
                b'/' => self.skip_comment()?,
                0 => return Ok(()),
                c => return Err(self.rd.error(ErrorKind::UnexpectedCharacter(c as char))),
            }
            if self.stack.is_empty() {
                if let Some(each) = &mut sink {
                    if let Some(root) = self.root.take() {
                        each(root);
                    }
                }
                self.rd.compact();
            }
        }
    }

    /// A non-empty stack after clean input exhaustion means the document
    /// ended inside a container.
    fn check_terminated(&self) -> Result<(), Error> {
        match self.stack.peek() {
            None => Ok(()),
            Some(frame) => Err(self.rd.error(if frame.next.in_array() {
                ErrorKind::ArrayNotTerminated
            } else {
                ErrorKind::HashNotTerminated
            })),
        }
    }

    fn array_start(&mut self) {
        let v = self.handler.start_array();
        self.stack.push(v, Next::ArrayNew);
    }

    fn array_end(&mut self) -> Result<(), Error> {
        let Some(mut frame) = self.stack.pop() else {
            return Err(self.rd.error(ErrorKind::UnexpectedArrayClose));
        };
        match frame.next {
            Next::ArrayNew | Next::ArrayComma => {
                self.handler.end_array(&mut frame.value);
                self.add_value(frame.value)
            }
            next => Err(self.rd.error(ErrorKind::ExpectedNotArrayClose(next.as_str()))),
        }
    }

    fn hash_start(&mut self) {
        let v = self.handler.start_hash();
        self.stack.push(v, Next::HashNew);
    }

    fn hash_end(&mut self) -> Result<(), Error> {
        let Some(mut frame) = self.stack.pop() else {
            return Err(self.rd.error(ErrorKind::UnexpectedHashClose));
        };
        match frame.next {
            Next::HashNew | Next::HashComma => {
                self.handler.end_hash(&mut frame.value);
                self.add_value(frame.value)
            }
            next => Err(self.rd.error(ErrorKind::ExpectedNotHashClose(next.as_str()))),
        }
    }

    fn comma(&mut self) -> Result<(), Error> {
        match self.stack.peek_mut() {
            Some(frame) if frame.next == Next::ArrayComma => {
                frame.next = Next::ArrayElement;
                Ok(())
            }
            Some(frame) if frame.next == Next::HashComma => {
                frame.next = Next::HashKey;
                Ok(())
            }
            _ => Err(self.rd.error(ErrorKind::UnexpectedComma)),
        }
    }

    fn colon(&mut self) -> Result<(), Error> {
        match self.stack.peek_mut() {
            Some(frame) if frame.next == Next::HashColon => {
                frame.next = Next::HashValue;
                Ok(())
            }
            _ => Err(self.rd.error(ErrorKind::UnexpectedColon)),
        }
    }

    fn read_true(&mut self) -> Result<(), Error> {
        if !self.rd.expect(b"rue") {
            return Err(self.rd.error(ErrorKind::ExpectedTrue));
        }
        let v = self.handler.new_bool(true);
        self.add_value(v)
    }

    fn read_false(&mut self) -> Result<(), Error> {
        if !self.rd.expect(b"alse") {
            return Err(self.rd.error(ErrorKind::ExpectedFalse));
        }
        let v = self.handler.new_bool(false);
        self.add_value(v)
    }

    /// Lowercase `n` opens either `null` or the bare `NaN` spelling with a
    /// case-lenient final letter. A sign in front routes through the number
    /// scanner instead.
    fn read_null_or_nan(&mut self) -> Result<(), Error> {
        match self.rd.get() {
            b'u' => {
                if !self.rd.expect(b"ll") {
                    return Err(self.rd.error(ErrorKind::ExpectedNull));
                }
                let v = self.handler.new_null();
                self.add_value(v)
            }
            b'a' => {
                let c = self.rd.get();
                if c != b'N' && c != b'n' {
                    return Err(self.rd.error(ErrorKind::ExpectedNaN));
                }
                let mut info = NumInfo::new(self.options.bigdec_load == BigDecLoad::Float);
                info.nan = true;
                bind_num(
                    &self.rd,
                    &mut self.stack,
                    &mut self.handler,
                    &mut self.root,
                    Num { info, text: "" },
                )
                .map_err(|kind| self.rd.error(kind))
            }
            _ => Err(self.rd.error(ErrorKind::InvalidToken)),
        }
    }

    /// String scanner. The fast path walks the protected window and
    /// delivers it as a zero-copy slice; the first backslash switches to
    /// the buffered escape decoder.
    fn read_str(&mut self) -> Result<(), Error> {
        self.rd.protect();
        loop {
            match self.rd.get() {
                b'"' => break,
                0 => return Err(self.rd.error(ErrorKind::QuotedStringNotTerminated)),
                b'\\' => {
                    let result = self.read_escaped_str();
                    self.rd.reset();
                    return result;
                }
                _ => {}
            }
        }
        let (start, end) = self.rd.window_range();
        let end = end - 1; // drop the closing quote
        let s = self.rd.slice(start, end);
        bind_cstr(
            &self.rd,
            &mut self.stack,
            &mut self.handler,
            &mut self.root,
            s,
            Some((start, end)),
        )
        .map_err(|kind| self.rd.error(kind))?;
        self.rd.reset();
        Ok(())
    }

    // entered just past the backslash that ended the fast path
    fn read_escaped_str(&mut self) -> Result<(), Error> {
        let mut buf = Buf::new();
        let window = self.rd.window();
        buf.append(&window[..window.len() - 1]);
        self.read_escape(&mut buf)?;
        loop {
            let c = self.rd.get();
            match c {
                b'"' => break,
                0 => return Err(self.rd.error(ErrorKind::QuotedStringNotTerminated)),
                b'\\' => self.read_escape(&mut buf)?,
                _ => buf.push(c),
            }
        }
        bind_cstr(
            &self.rd,
            &mut self.stack,
            &mut self.handler,
            &mut self.root,
            buf.as_slice(),
            None,
        )
        .map_err(|kind| self.rd.error(kind))
    }

    /// Decodes one escape sequence, the backslash already consumed.
    fn read_escape(&mut self, buf: &mut Buf) -> Result<(), Error> {
        match self.rd.get() {
            b'n' => buf.push(b'\n'),
            b'r' => buf.push(b'\r'),
            b't' => buf.push(b'\t'),
            b'f' => buf.push(0x0c),
            b'b' => buf.push(0x08),
            b'"' => buf.push(b'"'),
            b'/' => buf.push(b'/'),
            b'\\' => buf.push(b'\\'),
            b'u' => {
                let mut code = self.read_hex()?;
                if (0xD800..=0xDFFF).contains(&code) {
                    if self.rd.get() != b'\\' || self.rd.get() != b'u' {
                        return Err(self.rd.error(ErrorKind::InvalidEscapedCharacter));
                    }
                    let low = self.read_hex()?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return Err(self.rd.error(ErrorKind::InvalidEscapedCharacter));
                    }
                    code = (((code - 0xD800) << 10) | (low - 0xDC00)) + 0x1_0000;
                }
                buf.push_unicode(code).map_err(|kind| self.rd.error(kind))?;
            }
            _ => return Err(self.rd.error(ErrorKind::InvalidEscapedCharacter)),
        }
        Ok(())
    }

    fn read_hex(&mut self) -> Result<u32, Error> {
        let mut b = 0u32;
        for _ in 0..4 {
            let c = self.rd.get();
            let d = match c {
                b'0'..=b'9' => c - b'0',
                b'A'..=b'F' => c - b'A' + 10,
                b'a'..=b'f' => c - b'a' + 10,
                _ => return Err(self.rd.error(ErrorKind::InvalidHexCharacter)),
            };
            b = (b << 4) | u32::from(d);
        }
        Ok(b)
    }

    /// Number scanner, entered with the first byte already consumed.
    ///
    /// Accumulates into native fields until precision or magnitude exceeds
    /// what they can hold exactly; from then on only the digit count moves
    /// and materialization re-reads the protected text.
    fn read_num(&mut self, first: u8) -> Result<(), Error> {
        self.rd.protect_prev();
        let mut ni = NumInfo::new(self.options.bigdec_load == BigDecLoad::Float);
        let mut zero_cnt: u32 = 0;
        let mut c = first;

        if c == b'-' {
            c = self.rd.get();
            ni.neg = true;
        } else if c == b'+' {
            c = self.rd.get();
        }
        if c == b'I' {
            if !self.rd.expect(b"nfinity") {
                return Err(self.rd.error(ErrorKind::NotANumber));
            }
            ni.infinity = true;
        } else if c == b'N' || c == b'n' {
            let c1 = self.rd.get();
            let c2 = self.rd.get();
            if c1 != b'a' || (c2 != b'N' && c2 != b'n') {
                return Err(self.rd.error(ErrorKind::NotANumber));
            }
            ni.nan = true;
        } else {
            while c.is_ascii_digit() {
                ni.dec_cnt += 1;
                if !ni.big {
                    let d = i64::from(c - b'0');
                    if d == 0 {
                        zero_cnt += 1;
                    } else {
                        zero_cnt = 0;
                    }
                    match ni.i.checked_mul(10).and_then(|v| v.checked_add(d)) {
                        Some(v) => ni.i = v,
                        None => ni.big = true,
                    }
                    if ni.dec_cnt - zero_cnt > DEC_MAX {
                        ni.big = true;
                    }
                }
                c = self.rd.get();
            }
            if c == b'.' {
                c = self.rd.get();
                while c.is_ascii_digit() {
                    ni.dec_cnt += 1;
                    if !ni.big {
                        let d = i64::from(c - b'0');
                        if d == 0 {
                            zero_cnt += 1;
                        } else {
                            zero_cnt = 0;
                        }
                        match (
                            ni.num.checked_mul(10).and_then(|v| v.checked_add(d)),
                            ni.div.checked_mul(10),
                        ) {
                            (Some(num), Some(div)) => {
                                ni.num = num;
                                ni.div = div;
                            }
                            _ => ni.big = true,
                        }
                        if ni.dec_cnt - zero_cnt > DEC_MAX {
                            ni.big = true;
                        }
                    }
                    c = self.rd.get();
                }
            }
            if c == b'e' || c == b'E' {
                let mut eneg = false;
                c = self.rd.get();
                if c == b'-' {
                    eneg = true;
                    c = self.rd.get();
                } else if c == b'+' {
                    c = self.rd.get();
                }
                while c.is_ascii_digit() {
                    ni.exp = ni.exp.saturating_mul(10).saturating_add(i32::from(c - b'0'));
                    if ni.exp >= EXP_MAX {
                        ni.big = true;
                    }
                    c = self.rd.get();
                }
                if eneg {
                    ni.exp = -ni.exp;
                }
            }
            ni.dec_cnt -= zero_cnt;
            if c != 0 {
                self.rd.backup();
            }
        }
        if self.options.bigdec_load == BigDecLoad::BigDec {
            ni.big = true;
        }
        let num = Num {
            info: ni,
            text: self.rd.window_str(),
        };
        bind_num(
            &self.rd,
            &mut self.stack,
            &mut self.handler,
            &mut self.root,
            num,
        )
        .map_err(|kind| self.rd.error(kind))?;
        self.rd.reset();
        Ok(())
    }

    fn skip_comment(&mut self) -> Result<(), Error> {
        match self.rd.get() {
            b'*' => {
                let mut c = self.rd.get();
                loop {
                    match c {
                        0 => return Err(self.rd.error(ErrorKind::CommentNotTerminated)),
                        b'*' => {
                            c = self.rd.get();
                            if c == b'/' {
                                return Ok(());
                            }
                        }
                        _ => c = self.rd.get(),
                    }
                }
            }
            b'/' => loop {
                match self.rd.get() {
                    b'\n' | b'\r' | 0x0c | 0 => return Ok(()),
                    _ => {}
                }
            },
            _ => Err(self.rd.error(ErrorKind::InvalidCommentFormat)),
        }
    }

    fn add_value(&mut self, value: H::Value) -> Result<(), Error> {
        bind_value(
            &self.rd,
            &mut self.stack,
            &mut self.handler,
            &mut self.root,
            value,
        )
        .map_err(|kind| self.rd.error(kind))
    }
}

/// Binds a completed value into the parent frame, or delivers it as the
/// root. Owned keys are released here; window keys are simply dropped.
fn bind_value<H: Handler>(
    rd: &Reader<'_>,
    stack: &mut ValStack<H::Value>,
    handler: &mut H,
    root: &mut Option<H::Value>,
    value: H::Value,
) -> Result<(), ErrorKind> {
    let Some(parent) = stack.peek_mut() else {
        *root = Some(handler.add_value(value));
        return Ok(());
    };
    match parent.next {
        Next::ArrayNew | Next::ArrayElement => {
            handler.array_append_value(&mut parent.value, value);
            parent.next = Next::ArrayComma;
            Ok(())
        }
        Next::HashValue => {
            let key = parent.key.take().expect("key recorded before hash value");
            let (bytes, first) = key.resolve(rd);
            handler.hash_set_value(&mut parent.value, HashKey { bytes, first }, value);
            parent.next = Next::HashComma;
            Ok(())
        }
        next => Err(ErrorKind::Expected(next.as_str())),
    }
}

/// Binds a completed string. In key position the string is recorded on the
/// frame: window strings by range, escape-decoded strings by copy.
fn bind_cstr<H: Handler>(
    rd: &Reader<'_>,
    stack: &mut ValStack<H::Value>,
    handler: &mut H,
    root: &mut Option<H::Value>,
    s: &[u8],
    window: Option<(usize, usize)>,
) -> Result<(), ErrorKind> {
    let Some(parent) = stack.peek_mut() else {
        *root = Some(handler.add_cstr(s));
        return Ok(());
    };
    match parent.next {
        Next::ArrayNew | Next::ArrayElement => {
            handler.array_append_cstr(&mut parent.value, s);
            parent.next = Next::ArrayComma;
            Ok(())
        }
        Next::HashNew | Next::HashKey => {
            let first = s.first().copied().unwrap_or(0);
            parent.key = Some(match window {
                Some((start, end)) => Key::Window { start, end, first },
                None => Key::Owned {
                    bytes: s.to_vec(),
                    first,
                },
            });
            parent.next = Next::HashColon;
            Ok(())
        }
        Next::HashValue => {
            let key = parent.key.take().expect("key recorded before hash value");
            let (bytes, first) = key.resolve(rd);
            handler.hash_set_cstr(&mut parent.value, HashKey { bytes, first }, s);
            parent.next = Next::HashComma;
            Ok(())
        }
        next => Err(ErrorKind::ExpectedNotString(next.as_str())),
    }
}

/// Binds a completed number.
fn bind_num<H: Handler>(
    rd: &Reader<'_>,
    stack: &mut ValStack<H::Value>,
    handler: &mut H,
    root: &mut Option<H::Value>,
    num: Num<'_>,
) -> Result<(), ErrorKind> {
    let Some(parent) = stack.peek_mut() else {
        *root = Some(handler.add_num(num));
        return Ok(());
    };
    match parent.next {
        Next::ArrayNew | Next::ArrayElement => {
            handler.array_append_num(&mut parent.value, num);
            parent.next = Next::ArrayComma;
            Ok(())
        }
        Next::HashValue => {
            let key = parent.key.take().expect("key recorded before hash value");
            let (bytes, first) = key.resolve(rd);
            handler.hash_set_num(&mut parent.value, HashKey { bytes, first }, num);
            parent.next = Next::HashComma;
            Ok(())
        }
        next => Err(ErrorKind::Expected(next.as_str())),
    }
}
