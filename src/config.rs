use std::io::Write;

use serde::ser;

use crate::error::Result;
use crate::style::{Delimiter, FragmentWriter};
use crate::value::ParamMap;

/// Configuration for serialization behavior.
///
/// The `Config` struct selects the [`Style`] used to flatten arrays and maps
/// and whether keys and values are percent-encoded.
///
/// ## Value encoding
///
/// Keys and string values are percent-encoded like a URI component:
/// everything except ASCII alphanumerics and `-_.!~*'()` is encoded, so a
/// value holding `&`, `=`, `#`, `[`, `,` or `|` cannot split or extend the
/// pair it belongs to. Delimiters and brackets inserted by the style itself
/// are never encoded.
///
/// Default value: `style = Style::Form`, `encode_values = true`
///
/// ```
/// use querystyle::{Config, Style, params};
///
/// let params = params! { "city" => "Carrot City", "tags" => vec!["a|b", "c"] };
///
/// let config = Config::new().style(Style::Pipe);
/// assert_eq!(config.serialize_params(&params), "city=Carrot%20City&tags=a%7Cb|c");
///
/// let config = config.encode_values(false);
/// assert_eq!(config.serialize_params(&params), "city=Carrot City&tags=a|b|c");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    style: Style,
    encode_values: bool,
}

/// How arrays and maps are flattened into query parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    /// Use the `id=3,4,5` and `author=firstName,Felix` format.
    #[default]
    Form,
    /// Use the `id=3|4|5` format.
    Pipe,
    /// Use the `id=3%204%205` format.
    Space,
    /// Use the `id=3&id=4&id=5` and `firstName=Felix` format.
    Explode,
    /// Use the `author[name][first]=Felix` and `tags[]=a` format.
    Deep,
}

impl Style {
    /// Serializes `params` with this style and the default [`Config`].
    pub fn serialize(self, params: &ParamMap) -> String {
        Config::new().style(self).serialize_params(params)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            style: Style::Form,
            encode_values: true,
        }
    }

    /// Specifies the style used to flatten arrays and maps.
    ///
    /// The default is `Form`, which results in pairs like `id=3,4,5`.
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// By default keys and values are percent-encoded as URI components.
    /// Set this to `false` to write them verbatim.
    pub const fn encode_values(mut self, encode_values: bool) -> Self {
        self.encode_values = encode_values;
        self
    }

    /// Serializes a [`ParamMap`] into a query fragment using this `Config`.
    ///
    /// Entries holding [`ParamValue::Absent`](crate::ParamValue::Absent) are
    /// skipped, and an empty map yields an empty string.
    pub fn serialize_params(self, params: &ParamMap) -> String {
        let mut writer = FragmentWriter::new(self.encode_values);
        for (key, value) in params {
            match self.style {
                Style::Form => writer.delimited(key, value, Delimiter::Comma),
                Style::Pipe => writer.delimited(key, value, Delimiter::Pipe),
                Style::Space => writer.delimited(key, value, Delimiter::Space),
                Style::Explode => writer.explode(key, value),
                Style::Deep => writer.deep(key, value),
            }
        }
        let fragment = writer.finish();
        #[cfg(feature = "tracing")]
        tracing::trace!(style = ?self.style, %fragment, "serialized query fragment");
        fragment
    }

    /// Serializes an object to a query fragment using this `Config`.
    pub fn serialize_string<T: ser::Serialize + ?Sized>(self, input: &T) -> Result<String> {
        let params = crate::ser::to_params(input)?;
        Ok(self.serialize_params(&params))
    }

    /// Serializes an object to a query fragment using this `Config`.
    pub fn serialize_to_writer<T: ser::Serialize + ?Sized, W: Write>(
        self,
        input: &T,
        writer: &mut W,
    ) -> Result<()> {
        let fragment = self.serialize_string(input)?;
        writer.write_all(fragment.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn default_style_is_form() {
        let config = Config::default();
        assert_eq!(config.serialize_params(&params! { "id" => vec![1, 2] }), "id=1,2");
        assert_eq!(Style::default(), Style::Form);
    }

    #[test]
    fn style_serialize_matches_config() {
        let map = params! { "id" => vec![1, 2] };
        for style in [Style::Form, Style::Pipe, Style::Space, Style::Explode, Style::Deep] {
            assert_eq!(style.serialize(&map), Config::new().style(style).serialize_params(&map));
        }
    }
}
