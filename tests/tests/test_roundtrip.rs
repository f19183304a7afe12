// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, TimeZone, Utc};
use formbind_core::decoder::Decoder;
use formbind_core::encoder::Encoder;
use formbind_core::FormValue;
use formbind_derive::FormObject;
use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;

#[derive(FormObject, Debug, Default, Clone, PartialEq)]
pub struct Line {
    pub sku: String,
    pub qty: u32,
}

#[derive(FormObject, Debug, Default, Clone, PartialEq)]
pub struct Request {
    pub name: String,
    pub count: i64,
    pub small: i8,
    pub ratio: f64,
    pub flag: bool,
    pub tags: Vec<String>,
    pub nums: Vec<i32>,
    pub lines: Vec<Line>,
    pub attrs: BTreeMap<String, u16>,
    pub limit: Option<u32>,
    pub nested: Option<Line>,
}

fn roundtrip<T: FormValue + Default>(value: &T) -> T {
    let values = Encoder::default().encode(value).unwrap();
    let mut decoded = T::default();
    Decoder::default().decode(&mut decoded, &values).unwrap();
    decoded
}

prop_compose! {
    fn line()(sku in ".{0,8}", qty in any::<u32>()) -> Line {
        Line { sku, qty }
    }
}

prop_compose! {
    fn request()(
        name in ".{0,16}",
        count in any::<i64>(),
        small in any::<i8>(),
        ratio in -1.0e9f64..1.0e9f64,
        flag in any::<bool>(),
        tags in vec(".{0,6}", 0..4),
        nums in vec(any::<i32>(), 0..4),
        lines in vec(line(), 0..3),
        attrs in btree_map("[a-z]{1,6}", any::<u16>(), 0..4),
        limit in option::of(any::<u32>()),
        nested in option::of(line()),
    ) -> Request {
        Request { name, count, small, ratio, flag, tags, nums, lines, attrs, limit, nested }
    }
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(req in request()) {
        prop_assert_eq!(roundtrip(&req), req);
    }

    #[test]
    fn prop_bracket_namespaces_roundtrip(req in request()) {
        let encoder = Encoder::default().namespace("[", "]");
        let decoder = Decoder::default().namespace("[", "]");
        let values = encoder.encode(&req).unwrap();
        let mut decoded = Request::default();
        decoder.decode(&mut decoded, &values).unwrap();
        prop_assert_eq!(decoded, req);
    }
}

#[derive(FormObject, Debug, Default, PartialEq)]
pub struct Base {
    pub id: u64,
}

#[derive(FormObject, Debug, Default, PartialEq)]
pub struct Order {
    #[form(embed)]
    pub base: Base,
    #[tag(form = "tags,omitempty", collection_format = "csv")]
    pub tags: Vec<String>,
    pub picks: Vec<Option<String>>,
    pub grid: Vec<Vec<u8>>,
    pub fixed: [i16; 3],
    pub prices: HashMap<u32, f32>,
    pub places: HashMap<String, Line>,
    pub at: Option<DateTime<Utc>>,
    pub boxed: Box<Line>,
}

#[test]
fn test_order_roundtrip() {
    let order = Order {
        base: Base { id: 99 },
        tags: vec!["a".into(), "b".into(), "c".into()],
        picks: vec![Some("x".into()), None, Some(String::new())],
        grid: vec![vec![1, 2], vec![], vec![3]],
        fixed: [-1, 0, 7],
        prices: HashMap::from([(1, 0.5), (20, 3.25)]),
        places: HashMap::from([(
            "home".to_string(),
            Line {
                sku: "h".into(),
                qty: 1,
            },
        )]),
        at: Some(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()),
        boxed: Box::new(Line {
            sku: "b".into(),
            qty: 2,
        }),
    };
    let decoded = roundtrip(&order);
    // an empty inner list leaves no trace and comes back as a gap
    assert_eq!(decoded.grid, vec![vec![1, 2], vec![], vec![3]]);
    assert_eq!(decoded, order);
}

#[test]
fn test_csv_roundtrip() {
    let order = Order {
        tags: vec!["a".into(), "b".into(), "c".into()],
        ..Default::default()
    };
    let values = Encoder::default().encode(&order).unwrap();
    assert_eq!(values["tags"], vec!["a,b,c"]);
    assert_eq!(roundtrip(&order).tags, order.tags);
}

#[test]
fn test_omit_empty_roundtrip() {
    let order = Order::default();
    let values = Encoder::default().encode(&order).unwrap();
    assert!(!values.contains_key("tags"));
    assert_eq!(roundtrip(&order), order);
}
