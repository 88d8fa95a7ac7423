use crate::{parse, ErrorKind};

fn err_kind(json: &str) -> ErrorKind {
    parse(json).unwrap_err().kind
}

#[test]
fn unterminated_array() {
    assert_eq!(err_kind("[1, 2"), ErrorKind::ArrayNotTerminated);
    assert_eq!(err_kind("["), ErrorKind::ArrayNotTerminated);
    assert_eq!(err_kind("[[1]"), ErrorKind::ArrayNotTerminated);
}

#[test]
fn unterminated_hash() {
    assert_eq!(err_kind("{\"a\":1"), ErrorKind::HashNotTerminated);
    assert_eq!(err_kind("{"), ErrorKind::HashNotTerminated);
    assert_eq!(err_kind("{\"a\""), ErrorKind::HashNotTerminated);
}

#[test]
fn unterminated_string() {
    assert_eq!(err_kind("\"abc"), ErrorKind::QuotedStringNotTerminated);
    assert_eq!(err_kind("\"a\\nb"), ErrorKind::QuotedStringNotTerminated);
}

#[test]
fn missing_comma_between_elements() {
    assert_eq!(err_kind("[1 2]"), ErrorKind::Expected("comma"));
    assert_eq!(err_kind("[\"a\" \"b\"]"), ErrorKind::ExpectedNotString("comma"));
}

#[test]
fn missing_colon_is_deterministic() {
    assert_eq!(err_kind("{\"k\" 1}"), ErrorKind::Expected("colon"));
    assert_eq!(err_kind("{\"k\" \"v\"}"), ErrorKind::ExpectedNotString("colon"));
}

#[test]
fn stray_comma_and_colon() {
    assert_eq!(err_kind(","), ErrorKind::UnexpectedComma);
    assert_eq!(err_kind("[,1]"), ErrorKind::UnexpectedComma);
    assert_eq!(err_kind("{,}"), ErrorKind::UnexpectedComma);
    assert_eq!(err_kind(":"), ErrorKind::UnexpectedColon);
    assert_eq!(err_kind("[1:2]"), ErrorKind::UnexpectedColon);
}

#[test]
fn stray_closers() {
    assert_eq!(err_kind("]"), ErrorKind::UnexpectedArrayClose);
    assert_eq!(err_kind("}"), ErrorKind::UnexpectedHashClose);
}

#[test]
fn mismatched_closers() {
    assert_eq!(
        err_kind("[}"),
        ErrorKind::ExpectedNotHashClose("array element or close")
    );
    assert_eq!(
        err_kind("{]"),
        ErrorKind::ExpectedNotArrayClose("hash pair or close")
    );
}

#[test]
fn trailing_commas_are_rejected() {
    assert_eq!(
        err_kind("[1,]"),
        ErrorKind::ExpectedNotArrayClose("array element")
    );
    assert_eq!(
        err_kind("{\"a\":1,}"),
        ErrorKind::ExpectedNotHashClose("hash key")
    );
}

#[test]
fn literal_typos() {
    assert_eq!(err_kind("tru"), ErrorKind::ExpectedTrue);
    assert_eq!(err_kind("trxe"), ErrorKind::ExpectedTrue);
    assert_eq!(err_kind("fals"), ErrorKind::ExpectedFalse);
    assert_eq!(err_kind("nul"), ErrorKind::ExpectedNull);
    assert_eq!(err_kind("nx"), ErrorKind::InvalidToken);
    assert_eq!(err_kind("nax"), ErrorKind::ExpectedNaN);
}

#[test]
fn unexpected_characters() {
    assert_eq!(err_kind("abc"), ErrorKind::UnexpectedCharacter('a'));
    assert_eq!(err_kind("{\"a\"=1}"), ErrorKind::UnexpectedCharacter('='));
    assert_eq!(err_kind("[1,*]"), ErrorKind::UnexpectedCharacter('*'));
}

#[test]
fn bad_escapes() {
    assert_eq!(err_kind("\"\\q\""), ErrorKind::InvalidEscapedCharacter);
    assert_eq!(err_kind("\"ab\\"), ErrorKind::InvalidEscapedCharacter);
    assert_eq!(err_kind("\"\\u12g4\""), ErrorKind::InvalidHexCharacter);
    assert_eq!(err_kind("\"\\u12\""), ErrorKind::InvalidHexCharacter);
}

#[test]
fn bad_surrogate_pairs() {
    // high half not followed by a \u escape
    assert_eq!(
        err_kind("\"\\uD834x123\""),
        ErrorKind::InvalidEscapedCharacter
    );
    // low half out of range
    assert_eq!(
        err_kind("\"\\uD834\\u0061\""),
        ErrorKind::InvalidEscapedCharacter
    );
}

#[test]
fn broken_non_finite_forms() {
    assert_eq!(err_kind("Infinit"), ErrorKind::NotANumber);
    assert_eq!(err_kind("-Infinit"), ErrorKind::NotANumber);
    assert_eq!(err_kind("Inf"), ErrorKind::NotANumber);
    assert_eq!(err_kind("-Nax"), ErrorKind::NotANumber);
}

#[test]
fn error_positions() {
    let err = parse("[1,\n  x]").unwrap_err();
    assert_eq!((err.line, err.column), (2, 3));

    let err = parse("{\"a\": tru}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExpectedTrue);
    assert_eq!(err.line, 1);
}

#[test]
fn error_display_carries_position() {
    let err = parse("x").unwrap_err();
    assert_eq!(err.to_string(), "unexpected character 'x' at 1:1");
}

#[test]
fn garbage_after_scalar_value_in_array() {
    assert_eq!(err_kind("[1x]"), ErrorKind::UnexpectedCharacter('x'));
}
