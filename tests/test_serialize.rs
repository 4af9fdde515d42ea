use pretty_assertions::assert_eq;
use querystyle::{Config, Error, Style};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize)]
struct Address {
    city: String,
    postcode: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct QueryParams {
    id: u8,
    name: String,
    phone: u32,
    address: Address,
    user_ids: Vec<u8>,
}

fn params() -> QueryParams {
    QueryParams {
        id: 42,
        name: "Acme".to_string(),
        phone: 12345,
        address: Address {
            city: "Carrot City".to_string(),
            postcode: "12345".to_string(),
        },
        user_ids: vec![1, 2, 3, 4],
    }
}

fn serialize(style: Style, value: &impl Serialize) -> String {
    Config::new().style(style).serialize_string(value).unwrap()
}

#[test]
fn serialize_struct() {
    assert_eq!(
        querystyle::to_string(&params()).unwrap(),
        "id=42&name=Acme&phone=12345&\
         address=city,Carrot%20City,postcode,12345&user_ids=1,2,3,4"
    );
    insta::assert_snapshot!(
        serialize(Style::Deep, &params()),
        @"id=42&name=Acme&phone=12345&address[city]=Carrot%20City&address[postcode]=12345&user_ids[]=1&user_ids[]=2&user_ids[]=3&user_ids[]=4"
    );
    insta::assert_snapshot!(
        serialize(Style::Explode, &params()),
        @"id=42&name=Acme&phone=12345&city=Carrot%20City&postcode=12345&user_ids=1&user_ids=2&user_ids=3&user_ids=4"
    );
}

#[test]
fn serialize_option() {
    #[derive(Debug, Serialize, PartialEq)]
    struct Query {
        vec: Option<Vec<u8>>,
    }

    let query = Query { vec: None };
    for style in [Style::Form, Style::Explode, Style::Deep] {
        assert_eq!(serialize(style, &query), "");
    }

    let query = Query {
        vec: Some(vec![1, 2]),
    };
    assert_eq!(serialize(Style::Pipe, &query), "vec=1|2");
}

#[test]
fn serialize_enum() {
    #[derive(Debug, Serialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum TestEnum {
        A,
        B(bool),
        C { x: u8, y: u8 },
        D(u8, u8),
    }

    #[derive(Debug, Serialize, PartialEq)]
    struct Query {
        e: TestEnum,
    }

    let deep = |e| serialize(Style::Deep, &Query { e });
    assert_eq!(deep(TestEnum::A), "e=a");
    assert_eq!(deep(TestEnum::B(true)), "e[b]=true");
    assert_eq!(deep(TestEnum::C { x: 2, y: 3 }), "e[c][x]=2&e[c][y]=3");
    assert_eq!(deep(TestEnum::D(128, 1)), "e[d][]=128&e[d][]=1");

    let form = |e| serialize(Style::Form, &Query { e });
    assert_eq!(form(TestEnum::C { x: 2, y: 3 }), "e=c,x,2,y,3");
}

#[test]
fn serialize_flatten() {
    #[derive(Serialize, Debug, PartialEq)]
    struct Query {
        a: u8,
        #[serde(flatten)]
        common: CommonParams,
    }

    #[derive(Serialize, Debug, PartialEq)]
    struct CommonParams {
        limit: u64,
        offset: Option<u64>,
    }

    let query = Query {
        a: 1,
        common: CommonParams {
            limit: 100,
            offset: None,
        },
    };
    assert_eq!(querystyle::to_string(&query).unwrap(), "a=1&limit=100");
}

#[test]
fn serialize_maps_and_json() {
    let mut map = BTreeMap::new();
    map.insert("b", vec![1.5, 2.0]);
    map.insert("a", vec![]);
    assert_eq!(serialize(Style::Space, &map), "a=&b=1.5%202");

    let value = serde_json::json!({
        "author": { "name": { "first": "Felix", "last": "Gnass" } },
        "skip": null,
    });
    assert_eq!(
        serialize(Style::Deep, &value),
        "author[name][first]=Felix&author[name][last]=Gnass"
    );
}

#[test]
fn serialize_to_writer() {
    let mut buffer = Vec::new();
    Config::new()
        .style(Style::Explode)
        .serialize_to_writer(&params(), &mut buffer)
        .unwrap();
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        serialize(Style::Explode, &params())
    );
}

#[test]
fn unencoded_values() {
    let config = Config::new().style(Style::Deep).encode_values(false);
    assert_eq!(
        config.serialize_string(&params()).unwrap(),
        "id=42&name=Acme&phone=12345&address[city]=Carrot City&address[postcode]=12345&\
         user_ids[]=1&user_ids[]=2&user_ids[]=3&user_ids[]=4"
    );
}

#[test]
fn top_level_must_be_a_map() {
    let err = querystyle::to_string(&vec![1, 2]).unwrap_err();
    assert!(matches!(err, Error::TopLevel("sequence")));
    assert!(querystyle::to_string(&"plain").is_err());
}

#[test]
fn custom_errors_propagate() {
    struct Failing;

    impl Serialize for Failing {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("nope"))
        }
    }

    #[derive(Serialize)]
    struct Query {
        field: Failing,
    }

    let err = querystyle::to_string(&Query { field: Failing }).unwrap_err();
    assert_eq!(err.to_string(), "nope");
}
