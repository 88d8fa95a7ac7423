//! The delivery interface between the scanners and domain values.

use crate::num::Num;
use crate::options::Options;
use crate::value::{object_insert, Map, Value};

/// A hash key as delivered to the handler.
///
/// `first` is the first byte of the key, captured when the key was parsed,
/// so handlers that dispatch on marker prefixes can branch without touching
/// the bytes.
#[derive(Debug, Clone, Copy)]
pub struct HashKey<'a> {
    pub bytes: &'a [u8],
    pub first: u8,
}

impl HashKey<'_> {
    /// Key text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.bytes).into_owned()
    }
}

/// Receiver for scanner events, building the caller's domain values.
///
/// Callbacks arrive in strict document order: a container's start precedes
/// any child delivery, every child precedes the container's end, and each
/// key is established before its value. String payloads are raw bytes with
/// escape decoding already applied — the lenient `\u` range reaches beyond
/// what `str` can hold. Fast-path strings alias the reader's protected
/// window and are valid only for the duration of the callback; copy what
/// you keep.
pub trait Handler {
    /// Opaque handle for values under construction.
    type Value;

    fn new_null(&mut self) -> Self::Value;
    fn new_bool(&mut self, value: bool) -> Self::Value;

    /// Called once before the first byte is read. `options` carries the
    /// host policies (`circular`, `allow_gc`) that the core itself does not
    /// interpret.
    fn parse_start(&mut self, _options: &Options) {}

    /// Called after the driver returns, whether the parse succeeded or not.
    fn parse_end(&mut self) {}

    /// Root-level delivery of a completed value. Returns the value the
    /// parser retains as the document result.
    fn add_value(&mut self, value: Self::Value) -> Self::Value {
        value
    }
    fn add_cstr(&mut self, s: &[u8]) -> Self::Value;
    fn add_num(&mut self, num: Num<'_>) -> Self::Value;

    fn start_array(&mut self) -> Self::Value;
    fn end_array(&mut self, _array: &mut Self::Value) {}
    fn array_append_value(&mut self, array: &mut Self::Value, value: Self::Value);
    fn array_append_cstr(&mut self, array: &mut Self::Value, s: &[u8]);
    fn array_append_num(&mut self, array: &mut Self::Value, num: Num<'_>);

    fn start_hash(&mut self) -> Self::Value;
    fn end_hash(&mut self, _hash: &mut Self::Value) {}
    fn hash_set_value(&mut self, hash: &mut Self::Value, key: HashKey<'_>, value: Self::Value);
    fn hash_set_cstr(&mut self, hash: &mut Self::Value, key: HashKey<'_>, s: &[u8]);
    fn hash_set_num(&mut self, hash: &mut Self::Value, key: HashKey<'_>, num: Num<'_>);
}

impl<H: Handler> Handler for &mut H {
    type Value = H::Value;

    fn new_null(&mut self) -> Self::Value {
        (**self).new_null()
    }
    fn new_bool(&mut self, value: bool) -> Self::Value {
        (**self).new_bool(value)
    }
    fn parse_start(&mut self, options: &Options) {
        (**self).parse_start(options);
    }
    fn parse_end(&mut self) {
        (**self).parse_end();
    }
    fn add_value(&mut self, value: Self::Value) -> Self::Value {
        (**self).add_value(value)
    }
    fn add_cstr(&mut self, s: &[u8]) -> Self::Value {
        (**self).add_cstr(s)
    }
    fn add_num(&mut self, num: Num<'_>) -> Self::Value {
        (**self).add_num(num)
    }
    fn start_array(&mut self) -> Self::Value {
        (**self).start_array()
    }
    fn end_array(&mut self, array: &mut Self::Value) {
        (**self).end_array(array);
    }
    fn array_append_value(&mut self, array: &mut Self::Value, value: Self::Value) {
        (**self).array_append_value(array, value);
    }
    fn array_append_cstr(&mut self, array: &mut Self::Value, s: &[u8]) {
        (**self).array_append_cstr(array, s);
    }
    fn array_append_num(&mut self, array: &mut Self::Value, num: Num<'_>) {
        (**self).array_append_num(array, num);
    }
    fn start_hash(&mut self) -> Self::Value {
        (**self).start_hash()
    }
    fn end_hash(&mut self, hash: &mut Self::Value) {
        (**self).end_hash(hash);
    }
    fn hash_set_value(&mut self, hash: &mut Self::Value, key: HashKey<'_>, value: Self::Value) {
        (**self).hash_set_value(hash, key, value);
    }
    fn hash_set_cstr(&mut self, hash: &mut Self::Value, key: HashKey<'_>, s: &[u8]) {
        (**self).hash_set_cstr(hash, key, s);
    }
    fn hash_set_num(&mut self, hash: &mut Self::Value, key: HashKey<'_>, num: Num<'_>) {
        (**self).hash_set_num(hash, key, num);
    }
}

/// Default handler producing [`Value`] trees.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueHandler;

fn utf8(s: &[u8]) -> String {
    String::from_utf8_lossy(s).into_owned()
}

impl Handler for ValueHandler {
    type Value = Value;

    fn new_null(&mut self) -> Value {
        Value::Null
    }

    fn new_bool(&mut self, value: bool) -> Value {
        Value::Boolean(value)
    }

    fn add_cstr(&mut self, s: &[u8]) -> Value {
        Value::String(utf8(s))
    }

    fn add_num(&mut self, num: Num<'_>) -> Value {
        Value::Number(num.as_number())
    }

    fn start_array(&mut self) -> Value {
        Value::Array(Vec::new())
    }

    fn array_append_value(&mut self, array: &mut Value, value: Value) {
        if let Value::Array(items) = array {
            items.push(value);
        }
    }

    fn array_append_cstr(&mut self, array: &mut Value, s: &[u8]) {
        if let Value::Array(items) = array {
            items.push(Value::String(utf8(s)));
        }
    }

    fn array_append_num(&mut self, array: &mut Value, num: Num<'_>) {
        if let Value::Array(items) = array {
            items.push(Value::Number(num.as_number()));
        }
    }

    fn start_hash(&mut self) -> Value {
        Value::Object(Map::new())
    }

    fn hash_set_value(&mut self, hash: &mut Value, key: HashKey<'_>, value: Value) {
        if let Value::Object(map) = hash {
            object_insert(map, key.to_string_lossy(), value);
        }
    }

    fn hash_set_cstr(&mut self, hash: &mut Value, key: HashKey<'_>, s: &[u8]) {
        if let Value::Object(map) = hash {
            object_insert(map, key.to_string_lossy(), Value::String(utf8(s)));
        }
    }

    fn hash_set_num(&mut self, hash: &mut Value, key: HashKey<'_>, num: Num<'_>) {
        if let Value::Object(map) = hash {
            object_insert(map, key.to_string_lossy(), Value::Number(num.as_number()));
        }
    }
}
