use serde::ser;

use std::fmt::{self, Display};
use std::io;
use std::str;

/// Errors raised while converting a `Serialize` value into a [`ParamMap`].
///
/// Serializing a [`ParamMap`] with one of the styles never fails; only the
/// serde front end and writer output can.
///
/// [`ParamMap`]: crate::ParamMap
#[derive(Debug)]
pub enum Error {
    /// Custom message raised by a `Serialize` implementation.
    Custom(String),
    /// The value cannot be represented as a query parameter (for example a
    /// sequence used as a map key).
    Unsupported,
    /// The top-level value is not a struct, map or enum.
    TopLevel(&'static str),
    /// Byte strings must be valid UTF-8.
    Utf8(str::Utf8Error),
    Io(io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Generate error to show top-level type cannot be serialized.
    pub fn top_level(object: &'static str) -> Self {
        Error::TopLevel(object)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Custom(msg) => f.write_str(msg),
            Error::Unsupported => f.write_str("unsupported type for query parameter"),
            Error::TopLevel(object) => write!(
                f,
                "cannot serialize {object} at the top level. Try serializing a struct or map."
            ),
            Error::Utf8(e) => write!(f, "invalid UTF-8 in byte string: {e}"),
            Error::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Utf8(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::Custom(msg.to_string())
    }
}

impl From<str::Utf8Error> for Error {
    fn from(e: str::Utf8Error) -> Self {
        Error::Utf8(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_message_names_the_type() {
        let err = Error::top_level("sequence");
        assert_eq!(
            err.to_string(),
            "cannot serialize sequence at the top level. Try serializing a struct or map."
        );
    }

    #[test]
    fn custom_errors_come_from_serde() {
        let err = <Error as ser::Error>::custom("boom");
        assert!(matches!(err, Error::Custom(ref m) if m == "boom"));
    }
}
