//! Core type definitions shared by every collection.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Identifier of a record inside an [`IndexedCollection`](crate::IndexedCollection).
///
/// Source documents key their records by string-encoded integers; this is the
/// parsed form. Deserializes from either a JSON number or a numeric string so
/// that cross-references like `champEncounter` accept both encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        value
            .as_record_id()
            .ok_or_else(|| serde::de::Error::custom(format!("not a record id: {value}")))
    }
}

// ---------------------------------------------------------------------------
// Key parsing
// ---------------------------------------------------------------------------

/// Parse a record key with integer-prefix semantics.
///
/// Leading whitespace and a single sign are accepted, then as many decimal
/// digits as follow; anything after the digits is ignored, so `"12abc"` is
/// `12`. Returns `None` when no digit follows, or on `i64` overflow.
#[must_use]
pub fn parse_id_prefix(key: &str) -> Option<RecordId> {
    let rest = key.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let mut id: i64 = 0;
    for digit in rest[..digits].bytes() {
        id = id.checked_mul(10)?.checked_add(i64::from(digit - b'0'))?;
    }
    Some(RecordId(if negative { -id } else { id }))
}

/// Parse a record key, accepting only canonical base-10 integers (`"0"`,
/// `"42"`, `"-7"`). Leading zeros, whitespace and suffixes are rejected.
#[must_use]
pub fn parse_id_strict(key: &str) -> Option<RecordId> {
    let id: i64 = key.parse().ok()?;
    (id.to_string() == key).then_some(RecordId(id))
}

// ---------------------------------------------------------------------------
// Id coercion
// ---------------------------------------------------------------------------

/// Anything that can be used to look a record up by id.
///
/// Integers convert directly; strings go through [`parse_id_prefix`]; JSON
/// values accept integral numbers and numeric strings.
pub trait AsRecordId {
    /// Coerce to a record id, or `None` if the value has no integer reading.
    fn as_record_id(&self) -> Option<RecordId>;
}

impl AsRecordId for RecordId {
    fn as_record_id(&self) -> Option<RecordId> {
        Some(*self)
    }
}

macro_rules! impl_as_record_id_for_int {
    ($($t:ty),*) => {
        $(
            impl AsRecordId for $t {
                fn as_record_id(&self) -> Option<RecordId> {
                    i64::try_from(*self).ok().map(RecordId)
                }
            }
        )*
    };
}

impl_as_record_id_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl AsRecordId for str {
    fn as_record_id(&self) -> Option<RecordId> {
        parse_id_prefix(self)
    }
}

impl AsRecordId for String {
    fn as_record_id(&self) -> Option<RecordId> {
        parse_id_prefix(self)
    }
}

impl AsRecordId for Value {
    #[allow(clippy::cast_possible_truncation)]
    fn as_record_id(&self) -> Option<RecordId> {
        match self {
            Value::Number(n) => n.as_i64().map(RecordId).or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15)
                    .map(|f| RecordId(f as i64))
            }),
            Value::String(s) => parse_id_prefix(s),
            _ => None,
        }
    }
}

impl<T: AsRecordId + ?Sized> AsRecordId for &T {
    fn as_record_id(&self) -> Option<RecordId> {
        (**self).as_record_id()
    }
}

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

/// Strict equality between two JSON values.
///
/// Numbers compare by numeric value, so `5` equals `5.0`. Values of different
/// JSON types are never equal (`"5"` is not `5`).
#[must_use]
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}

/// JSON type name, for diagnostics.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
