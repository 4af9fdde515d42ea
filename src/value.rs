//! The value model serialized by every style.

use indexmap::IndexMap;
use serde::ser;

use std::fmt;

use crate::ser::encode::encode;

/// Query parameters keyed by name.
///
/// Iteration follows insertion order, which makes the output of every
/// style deterministic.
pub type ParamMap = IndexMap<String, ParamValue>;

/// A single query parameter value.
///
/// Every style is an exhaustive match over these four shapes. `Absent`
/// entries are never written, at any nesting level.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Scalar(Scalar),
    List(Vec<ParamValue>),
    Map(ParamMap),
    Absent,
}

/// A leaf value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, ParamValue::Absent)
    }
}

impl Scalar {
    /// Appends the textual form of the scalar to `out`, percent-encoding
    /// strings when `encode_values` is set.
    ///
    /// Numbers and booleans never need encoding.
    pub(crate) fn write_to(&self, out: &mut String, encode_values: bool) {
        match self {
            Scalar::Str(s) => out.push_str(&encode(s, encode_values)),
            Scalar::Int(v) => out.push_str(itoa::Buffer::new().format(*v)),
            Scalar::UInt(v) => out.push_str(itoa::Buffer::new().format(*v)),
            Scalar::Float(v) => write_float(out, *v),
            Scalar::Bool(true) => out.push_str("true"),
            Scalar::Bool(false) => out.push_str("false"),
        }
    }
}

/// Integral floats below this magnitude are written in full decimal.
const MAX_DECIMAL_INT: f64 = 1e21;

/// Integral floats are written without a fractional part (`3.0` -> `3`,
/// `1e20` -> `100000000000000000000`) and non-finite values use the
/// `NaN` / `Infinity` spelling.
///
/// From `1e21` upwards `ryu` picks the notation, giving `1e21` where a
/// JavaScript runtime would print `1e+21`.
fn write_float(out: &mut String, v: f64) {
    if v.is_nan() {
        out.push_str("NaN");
    } else if v.is_infinite() {
        out.push_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
    } else if v.fract() == 0.0 && v.abs() < MAX_DECIMAL_INT {
        // every integral f64 below 1e21 fits an i128 exactly
        out.push_str(itoa::Buffer::new().format(v as i128));
    } else {
        out.push_str(ryu::Buffer::new().format_finite(v));
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out, false);
        f.write_str(&out)
    }
}

impl From<Scalar> for ParamValue {
    fn from(scalar: Scalar) -> Self {
        ParamValue::Scalar(scalar)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Scalar(Scalar::Str(s.to_owned()))
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Scalar(Scalar::Str(s))
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        ParamValue::Scalar(Scalar::Str(s.clone()))
    }
}

impl From<char> for ParamValue {
    fn from(c: char) -> Self {
        ParamValue::Scalar(Scalar::Str(c.to_string()))
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Scalar(Scalar::Bool(b))
    }
}

macro_rules! from_int {
    ($variant:ident => $wide:ty : $($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(v: $ty) -> Self {
                    ParamValue::Scalar(Scalar::$variant(<$wide>::from(v)))
                }
            }
        )*
    };
}

from_int!(Int => i64: i8, i16, i32, i64);
from_int!(UInt => u64: u8, u16, u32, u64);

impl From<isize> for ParamValue {
    fn from(v: isize) -> Self {
        ParamValue::Scalar(Scalar::Int(v as i64))
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::Scalar(Scalar::UInt(v as u64))
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Scalar(Scalar::Float(f64::from(v)))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Scalar(Scalar::Float(v))
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(items: Vec<T>) -> Self {
        ParamValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Absent, Into::into)
    }
}

impl From<ParamMap> for ParamValue {
    fn from(map: ParamMap) -> Self {
        ParamValue::Map(map)
    }
}

impl ser::Serialize for Scalar {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Str(s) => serializer.serialize_str(s),
            Scalar::Int(v) => serializer.serialize_i64(*v),
            Scalar::UInt(v) => serializer.serialize_u64(*v),
            Scalar::Float(v) => serializer.serialize_f64(*v),
            Scalar::Bool(v) => serializer.serialize_bool(*v),
        }
    }
}

impl ser::Serialize for ParamValue {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Scalar(scalar) => scalar.serialize(serializer),
            ParamValue::List(items) => items.serialize(serializer),
            ParamValue::Map(map) => map.serialize(serializer),
            ParamValue::Absent => serializer.serialize_none(),
        }
    }
}

/// Builds a [`ParamMap`] from `key => value` pairs.
///
/// Values go through `ParamValue::from`, so nested `params!` invocations,
/// vectors and options can be mixed freely. `None` becomes
/// [`ParamValue::Absent`].
///
/// ```
/// use querystyle::{params, ParamValue};
///
/// let map = params! {
///     "id" => vec![3, 4, 5],
///     "author" => params! { "firstName" => "Felix" },
///     "foo" => ParamValue::Absent,
/// };
/// assert_eq!(map.len(), 3);
/// assert_eq!(querystyle::form(&map), "id=3,4,5&author=firstName,Felix");
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::ParamMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::ParamMap::new();
        $(
            map.insert(
                ::std::string::String::from($key),
                $crate::ParamValue::from($value),
            );
        )+
        map
    }};
}
