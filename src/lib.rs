//! OpenAPI-style querystring serialization
//!
//! Query parameters holding arrays or objects have no single canonical
//! encoding. This crate implements the styles described for query
//! parameters in [OpenAPI 3](https://swagger.io/docs/specification/v3_0/serialization/#query-parameters):
//!
//! | style                | `id = [3, 4, 5]`  | `author = { firstName: "Felix", role: "admin" }` |
//! |----------------------|-------------------|--------------------------------------------------|
//! | [`form`]             | `id=3,4,5`        | `author=firstName,Felix,role,admin`              |
//! | [`pipe`]             | `id=3\|4\|5`      | `author=firstName\|Felix\|role\|admin`           |
//! | [`space`]            | `id=3%204%205`    | `author=firstName%20Felix%20role%20admin`        |
//! | [`explode`]          | `id=3&id=4&id=5`  | `firstName=Felix&role=admin`                     |
//! | [`deep`]             | `id[]=3&id[]=4&id[]=5` | `author[firstName]=Felix&author[role]=admin` |
//!
//! Every style takes a [`ParamMap`] and returns a *fragment*: `key=value`
//! pairs joined with `&`. Entries holding [`ParamValue::Absent`] are left
//! out at every level. Fragments for different groups of parameters are
//! combined with [`query`], which adds the leading `?`.
//!
//! ## Usage
//!
//! ```
//! use querystyle::{ParamValue, deep, explode, form, params, query};
//!
//! let ids = params! { "id" => vec![3, 4, 5], "debug" => ParamValue::Absent };
//! let filter = params! { "filter" => params! { "role" => "admin" } };
//!
//! assert_eq!(
//!     query([form(&ids), deep(&filter)]),
//!     "?id=3,4,5&filter[role]=admin"
//! );
//! assert_eq!(explode(&ids), "id=3&id=4&id=5");
//! ```
//!
//! Any `Serialize` struct or map can be used in place of a hand-built
//! [`ParamMap`]:
//!
//! ```
//! # use serde::Serialize;
//! use querystyle::{Config, Style};
//!
//! #[derive(Serialize)]
//! struct Author {
//!     first: String,
//!     last: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Query {
//!     author: Author,
//!     page: Option<u32>,
//! }
//!
//! let q = Query {
//!     author: Author { first: "Felix".into(), last: "Gnass".into() },
//!     page: None,
//! };
//! let config = Config::new().style(Style::Deep);
//! assert_eq!(
//!     config.serialize_string(&q).unwrap(),
//!     "author[first]=Felix&author[last]=Gnass"
//! );
//! ```

mod config;
mod error;
mod ser;
mod style;
mod value;

#[doc(inline)]
pub use config::{Config, Style};
pub use error::{Error, Result};
#[doc(inline)]
pub use ser::{ParamSerializer, to_params, to_string, to_writer};
#[doc(inline)]
pub use style::{deep, explode, form, pipe, query, space};
#[doc(inline)]
pub use value::{ParamMap, ParamValue, Scalar};
