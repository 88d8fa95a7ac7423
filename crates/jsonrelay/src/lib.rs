//! Streaming, callback-driven JSON parsing.
//!
//! `jsonrelay` scans its input one byte at a time, tracks container nesting
//! with an explicit frame stack rather than recursion, and relays each
//! completed value to a [`Handler`] the moment it is scanned. The default
//! [`ValueHandler`] materializes [`Value`] trees; custom handlers can build
//! any domain representation without an intermediate tree. Strings that
//! need no escape decoding are delivered as zero-copy slices of the
//! reader's protected window.
//!
//! Beyond strict JSON the scanner accepts a documented set of lenient
//! extensions: `+`-signed numbers, `Infinity` and `NaN`, `/* */` and `//`
//! comments, and `\u` escapes decoded past the Unicode range.
//!
//! # Examples
//!
//! ```rust
//! use jsonrelay::{parse, Value};
//!
//! let value = parse(r#"{"series": [1, 2.5, null]}"#).unwrap();
//! assert!(value.get("series").is_some());
//! ```
//!
//! Streaming input and per-document delivery:
//!
//! ```rust
//! use jsonrelay::{Options, Parser, Reader, ValueHandler};
//!
//! let input = std::io::Cursor::new(b"{\"a\":1}\n{\"a\":2}\n".to_vec());
//! let parser = Parser::new(Reader::from_read(input), ValueHandler, Options::default());
//! let mut count = 0;
//! parser.parse_documents(|_doc| count += 1).unwrap();
//! assert_eq!(count, 2);
//! ```

mod buf;
mod error;
mod handler;
mod num;
mod options;
mod parser;
mod reader;
mod stack;
mod value;

pub use error::{Error, ErrorKind};
pub use handler::{Handler, HashKey, ValueHandler};
pub use num::{Num, NumInfo, Number};
pub use options::{BigDecLoad, Options};
pub use parser::{parse, parse_with, Parser};
pub use reader::Reader;
pub use value::{Array, Map, Value};

#[cfg(test)]
mod tests;
