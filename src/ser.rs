//! Serialization support for querystrings.

pub(crate) mod encode;

use serde::ser;

use crate::error::*;
use crate::value::{ParamMap, ParamValue, Scalar};

use std::io::Write;
use std::str;

/// Converts a value into a [`ParamMap`].
///
/// Structs and maps become maps, sequences become lists and `None` becomes
/// [`ParamValue::Absent`], so optional fields vanish from every style.
///
/// ```
/// # use serde::Serialize;
/// use querystyle::{ParamValue, params};
///
/// #[derive(Serialize)]
/// struct Query {
///     id: Vec<u8>,
///     name: Option<String>,
/// }
///
/// let params = querystyle::to_params(&Query { id: vec![3, 4], name: None }).unwrap();
/// assert_eq!(params, params! { "id" => vec![3u8, 4], "name" => ParamValue::Absent });
/// ```
pub fn to_params<T: ser::Serialize + ?Sized>(input: &T) -> Result<ParamMap> {
    let object = match input.serialize(ParamSerializer)? {
        ParamValue::Map(map) => return Ok(map),
        ParamValue::Scalar(_) => "primitive",
        ParamValue::List(_) => "sequence",
        ParamValue::Absent => "unit",
    };
    #[cfg(feature = "tracing")]
    tracing::debug!(object, "rejected top-level value");
    Err(Error::top_level(object))
}

/// Serializes a value into a querystring using the default `form` style.
///
/// ```
/// # use serde::Serialize;
/// #[derive(Serialize)]
/// struct Query {
///     name: String,
///     age: u8,
///     occupation: String,
/// }
///
/// let q = Query {
///     name: "Alice".to_owned(),
///     age: 24,
///     occupation: "Student".to_owned(),
/// };
///
/// assert_eq!(
///     querystyle::to_string(&q).unwrap(),
///     "name=Alice&age=24&occupation=Student");
/// ```
pub fn to_string<T: ser::Serialize + ?Sized>(input: &T) -> Result<String> {
    let config = crate::Config::default();
    config.serialize_string(input)
}

/// Serializes a value into a generic writer object using the default
/// `form` style.
///
/// ```
/// # use serde::Serialize;
/// #[derive(Serialize)]
/// struct Query {
///     tags: Vec<&'static str>,
/// }
///
/// let mut buffer = Vec::new();
/// querystyle::to_writer(&Query { tags: vec!["a", "b"] }, &mut buffer).unwrap();
/// assert_eq!(String::from_utf8(buffer).unwrap(), "tags=a,b");
/// ```
pub fn to_writer<T: ser::Serialize + ?Sized, W: Write>(input: &T, writer: &mut W) -> Result<()> {
    let config = crate::Config::default();
    config.serialize_to_writer(input, writer)
}

/// A serializer producing [`ParamValue`]s.
///
/// ## Mapping
///
/// * **Structs and maps** become [`ParamValue::Map`], keeping field order
/// * **Sequences and tuples** become [`ParamValue::List`]
/// * **`None` and unit** become [`ParamValue::Absent`]
/// * **Enum variants** with data become a single-entry map keyed by the
///   variant name; unit variants become their name
#[derive(Clone, Copy, Debug, Default)]
pub struct ParamSerializer;

macro_rules! serialize_scalar {
    (
        $($ty:ty => $meth:ident => $variant:ident from $wide:ty,)*) => {
        $(
            fn $meth(self, v: $ty) -> Result<Self::Ok> {
                Ok(ParamValue::Scalar(Scalar::$variant(<$wide>::from(v))))
            }
        )*
    };
}

impl ser::Serializer for ParamSerializer {
    type Ok = ParamValue;
    type Error = Error;
    type SerializeSeq = ListSerializer;
    type SerializeTuple = ListSerializer;
    type SerializeTupleStruct = ListSerializer;
    type SerializeTupleVariant = VariantSerializer<ListSerializer>;
    type SerializeMap = MapSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = VariantSerializer<MapSerializer>;

    serialize_scalar! {
        u8  => serialize_u8  => UInt from u64,
        u16 => serialize_u16 => UInt from u64,
        u32 => serialize_u32 => UInt from u64,
        u64 => serialize_u64 => UInt from u64,
        i8  => serialize_i8  => Int from i64,
        i16 => serialize_i16 => Int from i64,
        i32 => serialize_i32 => Int from i64,
        i64 => serialize_i64 => Int from i64,
        f32 => serialize_f32 => Float from f64,
        f64 => serialize_f64 => Float from f64,
    }

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(ParamValue::Scalar(Scalar::Bool(v)))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(ParamValue::Scalar(Scalar::Str(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(ParamValue::Scalar(Scalar::Str(v.to_owned())))
    }

    fn serialize_bytes(self, value: &[u8]) -> Result<Self::Ok> {
        let s = str::from_utf8(value)?;
        Ok(ParamValue::Scalar(Scalar::Str(s.to_owned())))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(ParamValue::Absent)
    }

    fn serialize_some<T: ?Sized + ser::Serialize>(self, value: &T) -> Result<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(ParamValue::Absent)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(ParamValue::Absent)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(ParamValue::Scalar(Scalar::Str(variant.to_owned())))
    }

    fn serialize_newtype_struct<T: ?Sized + ser::Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + ser::Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        let mut map = ParamMap::with_capacity(1);
        map.insert(variant.to_owned(), value.serialize(self)?);
        Ok(ParamValue::Map(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(ListSerializer::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        Ok(ListSerializer::new(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(ListSerializer::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(VariantSerializer {
            variant,
            inner: ListSerializer::new(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(MapSerializer::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(VariantSerializer {
            variant,
            inner: MapSerializer::new(len),
        })
    }
}

#[doc(hidden)]
pub struct ListSerializer {
    items: Vec<ParamValue>,
}

impl ListSerializer {
    fn new(len: usize) -> Self {
        Self {
            items: Vec::with_capacity(len),
        }
    }

    fn push<T: ser::Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(ParamSerializer)?);
        Ok(())
    }
}

impl ser::SerializeSeq for ListSerializer {
    type Ok = ParamValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(ParamValue::List(self.items))
    }
}

impl ser::SerializeTuple for ListSerializer {
    type Ok = ParamValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(ParamValue::List(self.items))
    }
}

impl ser::SerializeTupleStruct for ListSerializer {
    type Ok = ParamValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(ParamValue::List(self.items))
    }
}

#[doc(hidden)]
pub struct MapSerializer {
    map: ParamMap,
    key: Option<String>,
}

impl MapSerializer {
    fn new(len: usize) -> Self {
        Self {
            map: ParamMap::with_capacity(len),
            key: None,
        }
    }
}

impl ser::SerializeMap for MapSerializer {
    type Ok = ParamValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        let Some(key) = self.key.take() else {
            return Err(Error::Custom(
                "internal error: value serialized before its key".to_string(),
            ));
        };
        self.map.insert(key, value.serialize(ParamSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(ParamValue::Map(self.map))
    }
}

impl ser::SerializeStruct for MapSerializer {
    type Ok = ParamValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.map
            .insert(key.to_owned(), value.serialize(ParamSerializer)?);
        Ok(())
    }

    fn skip_field(&mut self, _key: &'static str) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(ParamValue::Map(self.map))
    }
}

/// Wraps the contents of a tuple or struct variant in a map keyed by the
/// variant name.
#[doc(hidden)]
pub struct VariantSerializer<S> {
    variant: &'static str,
    inner: S,
}

impl<S> VariantSerializer<S> {
    fn wrap(variant: &'static str, value: ParamValue) -> ParamValue {
        let mut map = ParamMap::with_capacity(1);
        map.insert(variant.to_owned(), value);
        ParamValue::Map(map)
    }
}

impl ser::SerializeTupleVariant for VariantSerializer<ListSerializer> {
    type Ok = ParamValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.inner.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        let value = ser::SerializeSeq::end(self.inner)?;
        Ok(Self::wrap(self.variant, value))
    }
}

impl ser::SerializeStructVariant for VariantSerializer<MapSerializer> {
    type Ok = ParamValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        let value = ser::SerializeStruct::end(self.inner)?;
        Ok(Self::wrap(self.variant, value))
    }
}

macro_rules! serialize_key_itoa {
    (
        $($ty:ty => $meth:ident,)*) => {
        $(
            fn $meth(self, v: $ty) -> Result<Self::Ok> {
                let mut buffer = itoa::Buffer::new();
                Ok(buffer.format(v).to_owned())
            }
        )*
    };
}

/// Serializes map keys, which must be representable as a single string.
struct KeySerializer;

impl KeySerializer {
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn unsupported(kind: &'static str) -> Error {
        #[cfg(feature = "tracing")]
        tracing::trace!(kind, "unsupported map key");
        Error::Unsupported
    }
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;
    type SerializeSeq = ser::Impossible<Self::Ok, Error>;
    type SerializeTuple = ser::Impossible<Self::Ok, Error>;
    type SerializeTupleStruct = ser::Impossible<Self::Ok, Error>;
    type SerializeTupleVariant = ser::Impossible<Self::Ok, Error>;
    type SerializeMap = ser::Impossible<Self::Ok, Error>;
    type SerializeStruct = ser::Impossible<Self::Ok, Error>;
    type SerializeStructVariant = ser::Impossible<Self::Ok, Error>;

    serialize_key_itoa! {
        u8  => serialize_u8,
        u16 => serialize_u16,
        u32 => serialize_u32,
        u64 => serialize_u64,
        i8  => serialize_i8,
        i16 => serialize_i16,
        i32 => serialize_i32,
        i64 => serialize_i64,
    }

    fn serialize_f32(self, _v: f32) -> Result<Self::Ok> {
        Err(Self::unsupported("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Self::Ok> {
        Err(Self::unsupported("f64"))
    }

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(if v { "true" } else { "false" }.to_owned())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(v.to_owned())
    }

    fn serialize_bytes(self, value: &[u8]) -> Result<Self::Ok> {
        Ok(str::from_utf8(value)?.to_owned())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T: ?Sized + ser::Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        value.serialize(self)
    }

    /// Returns an error.
    fn serialize_unit(self) -> Result<Self::Ok> {
        Err(Self::unsupported("unit"))
    }

    /// Returns an error.
    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Err(Self::unsupported("unit struct"))
    }

    /// Returns an error.
    fn serialize_newtype_variant<T: ?Sized + ser::Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok> {
        Err(Self::unsupported("newtype variant"))
    }

    /// Returns an error.
    fn serialize_none(self) -> Result<Self::Ok> {
        Err(Self::unsupported("none"))
    }

    /// Returns an error.
    fn serialize_some<T: ?Sized + ser::Serialize>(self, _value: &T) -> Result<Self::Ok> {
        Err(Self::unsupported("option"))
    }

    /// Returns an error.
    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Self::unsupported("sequence"))
    }

    /// Returns an error.
    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Self::unsupported("tuple"))
    }

    /// Returns an error.
    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Self::unsupported("tuple struct"))
    }

    /// Returns an error.
    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Self::unsupported("tuple variant"))
    }

    /// Returns an error.
    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Self::unsupported("map"))
    }

    /// Returns an error.
    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Self::unsupported("struct"))
    }

    /// Returns an error.
    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Self::unsupported("struct variant"))
    }
}
