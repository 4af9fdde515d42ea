//! The query parameter styles.
//!
//! Each style turns a [`ParamMap`] into a query fragment (`key=value` pairs
//! joined with `&`, without a leading `?`). Fragments produced for different
//! groups of parameters are combined with [`query`].

use crate::Config;
use crate::ser::encode::encode;
use crate::value::{ParamMap, ParamValue, Scalar};

/// Separator placed between the elements of a form-style value.
///
/// Delimiters are written as-is and never percent-encoded; the space
/// delimiter is spelled `%20` directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Delimiter {
    Comma,
    Pipe,
    Space,
}

impl Delimiter {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Pipe => "|",
            Delimiter::Space => "%20",
        }
    }
}

/// Serializes with the comma-delimited `form` style.
///
/// Arrays join their elements with `,`, maps flatten to
/// `key,value,key,value`, and every top-level key yields exactly one pair.
///
/// ```
/// use querystyle::{form, params};
///
/// assert_eq!(form(&params! { "id" => vec![3, 4, 5] }), "id=3,4,5");
/// assert_eq!(
///     form(&params! { "author" => params! { "firstName" => "Felix", "role" => "admin" } }),
///     "author=firstName,Felix,role,admin"
/// );
/// ```
pub fn form(params: &ParamMap) -> String {
    Config::new().style(crate::Style::Form).serialize_params(params)
}

/// Serializes like [`form`], joining elements with `|`.
///
/// ```
/// assert_eq!(querystyle::pipe(&querystyle::params! { "id" => vec![3, 4, 5] }), "id=3|4|5");
/// ```
pub fn pipe(params: &ParamMap) -> String {
    Config::new().style(crate::Style::Pipe).serialize_params(params)
}

/// Serializes like [`form`], joining elements with `%20`.
///
/// ```
/// assert_eq!(querystyle::space(&querystyle::params! { "id" => vec![3, 4, 5] }), "id=3%204%205");
/// ```
pub fn space(params: &ParamMap) -> String {
    Config::new().style(crate::Style::Space).serialize_params(params)
}

/// Serializes every array element and map entry as its own parameter.
///
/// Array elements repeat the key (`id=3&id=4`); map entries use their own
/// key and the outer key is dropped.
///
/// ```
/// use querystyle::{explode, params};
///
/// assert_eq!(explode(&params! { "id" => vec![3, 4, 5] }), "id=3&id=4&id=5");
/// assert_eq!(
///     explode(&params! { "author" => params! { "firstName" => "Felix", "role" => "admin" } }),
///     "firstName=Felix&role=admin"
/// );
/// ```
pub fn explode(params: &ParamMap) -> String {
    Config::new().style(crate::Style::Explode).serialize_params(params)
}

/// Serializes maps with bracketed keys, `outer[inner]=value`, to any depth.
///
/// Arrays use empty brackets: `{ tags: [a, b] }` becomes `tags[]=a&tags[]=b`.
///
/// ```
/// use querystyle::{deep, params};
///
/// let nested = params! {
///     "author" => params! { "name" => params! { "first" => "Felix", "last" => "Gnass" } },
/// };
/// assert_eq!(deep(&nested), "author[name][first]=Felix&author[name][last]=Gnass");
/// ```
pub fn deep(params: &ParamMap) -> String {
    Config::new().style(crate::Style::Deep).serialize_params(params)
}

/// Joins query fragments into a query string.
///
/// Empty fragments are skipped. A non-empty result gets a leading `?`;
/// otherwise the empty string is returned.
///
/// ```
/// use querystyle::query;
///
/// assert_eq!(query(["foo=bar", "", "boo=baz"]), "?foo=bar&boo=baz");
/// assert_eq!(query(Vec::<String>::new()), "");
/// ```
pub fn query<I>(fragments: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = String::new();
    for fragment in fragments {
        let fragment = fragment.as_ref();
        if fragment.is_empty() {
            continue;
        }
        out.push(if out.is_empty() { '?' } else { '&' });
        out.push_str(fragment);
    }
    out
}

/// Variadic form of [`query`].
///
/// ```
/// use querystyle::{form, params, query};
///
/// let ids = form(&params! { "id" => vec![1, 2] });
/// assert_eq!(query!(ids, "limit=10"), "?id=1,2&limit=10");
/// assert_eq!(query!(), "");
/// ```
#[macro_export]
macro_rules! query {
    ($($fragment:expr),* $(,)?) => {
        $crate::query::<&[&str]>(&[$(::core::convert::AsRef::<str>::as_ref(&$fragment)),*])
    };
}

/// Accumulates one query fragment.
///
/// `key` is the stack of encoded key segments used by the deep style: the
/// first segment is the bare parameter name, every later one is wrapped in
/// brackets.
pub(crate) struct FragmentWriter {
    out: String,
    first_kv: bool,
    key: Vec<String>,
    encode_values: bool,
}

impl FragmentWriter {
    pub(crate) fn new(encode_values: bool) -> Self {
        Self {
            out: String::new(),
            first_kv: true,
            key: Vec::with_capacity(4),
            encode_values,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn start_pair(&mut self) {
        if self.first_kv {
            self.first_kv = false;
        } else {
            self.out.push('&');
        }
    }

    fn write_key(&mut self, key: &str) {
        self.out.push_str(&encode(key, self.encode_values));
    }

    fn write_pair(&mut self, key: &str, value: &Scalar) {
        self.start_pair();
        self.write_key(key);
        self.out.push('=');
        value.write_to(&mut self.out, self.encode_values);
    }

    /// Writes one `key=a<delim>b<delim>c` pair for a top-level entry.
    pub(crate) fn delimited(&mut self, key: &str, value: &ParamValue, delimiter: Delimiter) {
        match value {
            ParamValue::Absent => {}
            ParamValue::Scalar(scalar) => self.write_pair(key, scalar),
            ParamValue::List(_) | ParamValue::Map(_) => {
                self.start_pair();
                self.write_key(key);
                self.out.push('=');
                let mut first = true;
                self.flatten(value, delimiter, &mut first);
            }
        }
    }

    /// Splices the elements of `value` into the current pair. Nested
    /// arrays and maps are flattened recursively.
    fn flatten(&mut self, value: &ParamValue, delimiter: Delimiter, first: &mut bool) {
        match value {
            ParamValue::Absent => {}
            ParamValue::Scalar(scalar) => {
                self.delimit(delimiter, first);
                scalar.write_to(&mut self.out, self.encode_values);
            }
            ParamValue::List(items) => {
                for item in items {
                    self.flatten(item, delimiter, first);
                }
            }
            ParamValue::Map(map) => {
                for (key, item) in map {
                    if item.is_absent() {
                        continue;
                    }
                    self.delimit(delimiter, first);
                    self.write_key(key);
                    self.flatten(item, delimiter, first);
                }
            }
        }
    }

    fn delimit(&mut self, delimiter: Delimiter, first: &mut bool) {
        if *first {
            *first = false;
        } else {
            self.out.push_str(delimiter.as_str());
        }
    }

    /// Writes one pair per array element or map entry.
    pub(crate) fn explode(&mut self, key: &str, value: &ParamValue) {
        match value {
            ParamValue::Absent => {}
            ParamValue::Scalar(scalar) => self.write_pair(key, scalar),
            ParamValue::List(items) => {
                for item in items {
                    self.explode(key, item);
                }
            }
            ParamValue::Map(map) => {
                for (entry_key, item) in map {
                    self.explode(entry_key, item);
                }
            }
        }
    }

    /// Writes `key[a][b]=value` pairs for every leaf below `key`.
    pub(crate) fn deep(&mut self, key: &str, value: &ParamValue) {
        self.push_key(key);
        self.deep_value(value);
        self.pop_key();
    }

    fn deep_value(&mut self, value: &ParamValue) {
        match value {
            ParamValue::Absent => {}
            ParamValue::Scalar(scalar) => {
                self.write_key_stack();
                self.out.push('=');
                scalar.write_to(&mut self.out, self.encode_values);
            }
            ParamValue::List(items) => {
                for item in items {
                    self.push_key("");
                    self.deep_value(item);
                    self.pop_key();
                }
            }
            ParamValue::Map(map) => {
                for (key, item) in map {
                    self.push_key(key);
                    self.deep_value(item);
                    self.pop_key();
                }
            }
        }
    }

    /// Pushes a new key segment onto the key stack.
    ///
    /// - First key "author" becomes: `author`
    /// - Second key "name" becomes: `author[name]`
    /// - Third key "first" becomes: `author[name][first]`
    fn push_key(&mut self, key: &str) {
        let encoded = encode(key, self.encode_values);
        let segment = if self.key.is_empty() {
            encoded.into_owned()
        } else {
            let mut segment = String::with_capacity(encoded.len() + 2);
            segment.push('[');
            segment.push_str(&encoded);
            segment.push(']');
            segment
        };
        self.key.push(segment);
    }

    fn pop_key(&mut self) {
        self.key.pop();
    }

    fn write_key_stack(&mut self) {
        self.start_pair();
        for segment in &self.key {
            self.out.push_str(segment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn delimiters() {
        assert_eq!(Delimiter::Comma.as_str(), ",");
        assert_eq!(Delimiter::Pipe.as_str(), "|");
        assert_eq!(Delimiter::Space.as_str(), "%20");
    }

    #[test]
    fn key_stack_builds_brackets() {
        let mut writer = FragmentWriter::new(true);
        writer.push_key("a");
        writer.push_key("b c");
        writer.push_key("");
        writer.write_key_stack();
        assert_eq!(writer.finish(), "a[b%20c][]");
    }

    #[test]
    fn empty_containers() {
        let map = params! { "ids" => Vec::<u8>::new(), "obj" => params! {} };
        assert_eq!(form(&map), "ids=&obj=");
        assert_eq!(explode(&map), "");
        assert_eq!(deep(&map), "");
    }

    #[test]
    fn query_skips_empty_fragments() {
        assert_eq!(query(["", ""]), "");
        assert_eq!(query(["", "a=1"]), "?a=1");
        assert_eq!(query!(String::from("a=1"), "b=2", ""), "?a=1&b=2");
    }
}
