use crate::{parse, Number, Value};

#[test]
fn scalar_roots() {
    assert_eq!(parse("null"), Ok(Value::Null));
    assert_eq!(parse("true"), Ok(Value::Boolean(true)));
    assert_eq!(parse("false"), Ok(Value::Boolean(false)));
    assert_eq!(parse("\"a\""), Ok(Value::from("a")));
    assert_eq!(parse("7"), Ok(Value::from(7i64)));
}

#[test]
fn array_of_mixed_scalars() {
    let v = parse(r#"[1, 2.5, -3e2, "a"]"#).unwrap();
    assert_eq!(
        v,
        Value::Array(vec![
            Value::from(1i64),
            Value::from(2.5),
            Value::from(-300.0),
            Value::from("a"),
        ])
    );
}

#[test]
fn object_keys_in_document_order() {
    let v = parse(r#"{"k":"v","n":null,"t":true,"f":false}"#).unwrap();
    assert_eq!(
        v,
        Value::Object(vec![
            ("k".into(), Value::from("v")),
            ("n".into(), Value::Null),
            ("t".into(), Value::Boolean(true)),
            ("f".into(), Value::Boolean(false)),
        ])
    );
}

#[test]
fn nested_containers() {
    let v = parse(r#"{"a": [1, {"b": [true]}], "c": {}}"#).unwrap();
    let a = v.get("a").and_then(Value::as_array).unwrap();
    assert_eq!(a[0], Value::from(1i64));
    let b = a[1].get("b").and_then(Value::as_array).unwrap();
    assert_eq!(b[0], Value::Boolean(true));
    assert_eq!(v.get("c"), Some(&Value::Object(vec![])));
}

#[test]
fn empty_containers() {
    assert_eq!(parse("[]"), Ok(Value::Array(vec![])));
    assert_eq!(parse("{}"), Ok(Value::Object(vec![])));
    assert_eq!(
        parse("[[], {}]"),
        Ok(Value::Array(vec![
            Value::Array(vec![]),
            Value::Object(vec![]),
        ]))
    );
}

#[test]
fn empty_input_is_null() {
    assert_eq!(parse(""), Ok(Value::Null));
    assert_eq!(parse(" \t\r\n\x0c"), Ok(Value::Null));
}

#[test]
fn whitespace_everywhere() {
    let v = parse(" \n{ \"a\" :\t[ 1 ,\r\n 2 ] } \n").unwrap();
    assert_eq!(
        v.get("a"),
        Some(&Value::Array(vec![Value::from(1i64), Value::from(2i64)]))
    );
}

#[test]
fn duplicate_keys_take_last_value() {
    let v = parse(r#"{"k":1,"k":2}"#).unwrap();
    assert_eq!(v, Value::Object(vec![("k".into(), Value::from(2i64))]));
}

#[test]
fn deeply_nested_arrays_do_not_recurse() {
    let depth = 10_000;
    let mut doc = String::new();
    for _ in 0..depth {
        doc.push('[');
    }
    for _ in 0..depth {
        doc.push(']');
    }
    let mut v = parse(&doc).unwrap();
    let mut seen = 0;
    while let Value::Array(mut items) = v {
        seen += 1;
        match items.pop() {
            Some(inner) => v = inner,
            None => break,
        }
    }
    assert_eq!(seen, depth);
}

#[test]
fn reencode_then_reparse_is_stable() {
    let doc = r#"{"k":[1,2.5,"x"],"m":{"n":null}}"#;
    let v = parse(doc).unwrap();
    let encoded = v.to_string();
    assert_eq!(parse(&encoded).unwrap(), v);
}

#[test]
fn number_value_accessor() {
    let v = parse("12").unwrap();
    assert_eq!(v.as_number(), Some(&Number::Integer(12)));
    assert_eq!(v.as_number().map(Number::as_f64), Some(12.0));
}
