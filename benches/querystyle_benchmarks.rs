use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use querystyle::{Config, ParamMap, Style, params};
use serde::Serialize;

const STYLES: [Style; 5] = [Style::Form, Style::Pipe, Style::Space, Style::Explode, Style::Deep];

#[derive(Debug, Clone, Serialize)]
struct Address {
    city: String,
    street: String,
    postcode: String,
}

#[derive(Debug, Clone, Serialize)]
struct QueryParams {
    id: u8,
    name: String,
    phone: u32,
    email: Option<String>,
    address: Address,
    user_ids: Vec<u8>,
}

fn nested_params() -> ParamMap {
    params! {
        "id" => 42,
        "name" => "Acme",
        "address" => params! {
            "city" => "Carrot City",
            "street" => "Special-Street* No. 11",
            "geo" => params! { "lat" => 52.52, "lng" => 13.405 },
        },
        "user_ids" => vec![1, 2, 3, 4],
    }
}

fn serialize_param_map(c: &mut Criterion) {
    let data = nested_params();
    let mut group = c.benchmark_group("serialize_param_map");
    for style in STYLES {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{style:?}")), &data, |b, data| {
            b.iter(|| style.serialize(black_box(data)))
        });
    }
    group.finish();
}

fn serialize_large_vec(c: &mut Criterion) {
    let data = params! { "items" => (0..100).collect::<Vec<u32>>() };
    let mut group = c.benchmark_group("serialize_large_vec");
    for style in STYLES {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{style:?}")), &data, |b, data| {
            b.iter(|| style.serialize(black_box(data)))
        });
    }
    group.finish();
}

fn serialize_struct(c: &mut Criterion) {
    let data = QueryParams {
        id: 42,
        name: "Acme".to_string(),
        phone: 12345,
        email: None,
        address: Address {
            city: "Carrot City".to_string(),
            street: "Special-Street* No. 11".to_string(),
            postcode: "12345".to_string(),
        },
        user_ids: vec![1, 2, 3, 4],
    };
    let config = Config::new().style(Style::Deep);

    c.bench_function("serialize_struct", |b| {
        b.iter(|| config.serialize_string(black_box(&data)).unwrap())
    });
}

fn build_query(c: &mut Criterion) {
    let fragments = [
        "id=1,2,3".to_string(),
        String::new(),
        "filter[role]=admin".to_string(),
    ];

    c.bench_function("build_query", |b| {
        b.iter(|| querystyle::query(black_box(&fragments)))
    });
}

criterion_group!(
    benches,
    serialize_param_map,
    serialize_large_vec,
    serialize_struct,
    build_query
);
criterion_main!(benches);
