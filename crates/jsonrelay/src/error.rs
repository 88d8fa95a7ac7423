use thiserror::Error;

/// A parse failure: what went wrong and where.
///
/// `line` and `column` are 1-based and locate the byte the reader handed out
/// when the failure was recorded. The first failure wins; every scanner
/// returns immediately on error and the driver stops dispatching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct Error {
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
}

/// Every distinct failure the scanners and the driver can report.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("invalid comment format")]
    InvalidCommentFormat,
    #[error("comment not terminated")]
    CommentNotTerminated,
    #[error("invalid hex character")]
    InvalidHexCharacter,
    #[error("invalid Unicode character")]
    InvalidUnicodeCharacter,
    #[error("quoted string not terminated")]
    QuotedStringNotTerminated,
    #[error("invalid escaped character")]
    InvalidEscapedCharacter,
    #[error("not a number or other value")]
    NotANumber,
    #[error("expected true")]
    ExpectedTrue,
    #[error("expected false")]
    ExpectedFalse,
    #[error("expected null")]
    ExpectedNull,
    #[error("expected NaN")]
    ExpectedNaN,
    #[error("invalid token")]
    InvalidToken,
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unexpected comma")]
    UnexpectedComma,
    #[error("unexpected colon")]
    UnexpectedColon,
    #[error("unexpected array close")]
    UnexpectedArrayClose,
    #[error("unexpected hash close")]
    UnexpectedHashClose,
    #[error("expected {0}")]
    Expected(&'static str),
    #[error("expected {0}, not a string")]
    ExpectedNotString(&'static str),
    #[error("expected {0}, not an array close")]
    ExpectedNotArrayClose(&'static str),
    #[error("expected {0}, not a hash close")]
    ExpectedNotHashClose(&'static str),
    #[error("array not terminated")]
    ArrayNotTerminated,
    #[error("hash/object not terminated")]
    HashNotTerminated,
}
