use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched when encoding keys and values.
///
/// This is the `encodeURIComponent` set: everything except ASCII
/// alphanumerics and `-_.!~*'()` is percent-encoded. In particular the
/// querystring control characters are always encoded:
/// - `&` and `=` which separate pairs and keys from values
/// - `+` which stands for a space in form data
/// - `#` which starts the URL fragment
/// - `[` and `]` which denote nested keys
/// - `,`, `|` and `%` which delimit elements and escapes
///
/// NOTE: this is only ever called on keys and values, never on the
/// delimiters and brackets a style writes itself.
const QUERY_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encodes a key or scalar value for use in a query fragment.
///
/// Borrows the input when nothing needs encoding, or when encoding is
/// disabled altogether.
pub fn encode(s: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(s);
    }
    percent_encoding::utf8_percent_encode(s, QUERY_COMPONENT_SET).into()
}

#[cfg(test)]
mod tests {
    use super::encode;

    #[test]
    fn keeps_unreserved_characters() {
        assert_eq!(encode("first-name_1.x~(y)*'!", true), "first-name_1.x~(y)*'!");
    }

    #[test]
    fn encodes_querystring_control_characters() {
        assert_eq!(encode("a&b=c", true), "a%26b%3Dc");
        assert_eq!(encode("c++", true), "c%2B%2B");
        assert_eq!(encode("x#y", true), "x%23y");
        assert_eq!(encode("k]x[y", true), "k%5Dx%5By");
        assert_eq!(encode("a,b|c", true), "a%2Cb%7Cc");
        assert_eq!(encode("a/b?c", true), "a%2Fb%3Fc");
    }

    #[test]
    fn encodes_space_quote_percent_and_unicode() {
        assert_eq!(encode("Carrot City", true), "Carrot%20City");
        assert_eq!(encode("\"100%\"", true), "%22100%25%22");
        assert_eq!(encode("<b>", true), "%3Cb%3E");
        assert_eq!(encode("comté", true), "comt%C3%A9");
        assert_eq!(encode("a\nb", true), "a%0Ab");
    }

    #[test]
    fn disabled_encoding_borrows() {
        let encoded = encode("Carrot City", false);
        assert!(matches!(encoded, std::borrow::Cow::Borrowed("Carrot City")));
    }
}
