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

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use formbind_core::encoder::{EncodeOptions, Encoder, TypedValue};
use formbind_core::error::Error;
use formbind_core::values::{values_from_pairs, Values};
use formbind_core::Dynamic;
use formbind_derive::FormObject;

#[derive(FormObject, Debug, Default, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
}

#[derive(FormObject, Debug, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: u8,
    pub active: bool,
    pub score: f64,
    pub address: Address,
    pub addresses: Vec<Address>,
    pub tags: Vec<String>,
}

fn sample_person() -> Person {
    Person {
        name: "Bob".into(),
        age: 42,
        active: true,
        score: 0.1,
        address: Address {
            street: String::new(),
            city: "Oslo".into(),
        },
        addresses: vec![Address {
            street: "Via Roma".into(),
            city: "Rome".into(),
        }],
        tags: vec!["a".into(), "b".into()],
    }
}

#[test]
fn test_encode_person() {
    let values = Encoder::default().encode(&sample_person()).unwrap();
    let expected = values_from_pairs([
        ("name", "Bob"),
        ("age", "42"),
        ("active", "true"),
        ("score", "0.1"),
        ("address.street", ""),
        ("address.city", "Oslo"),
        ("addresses[0].street", "Via Roma"),
        ("addresses[0].city", "Rome"),
        ("tags", "a"),
        ("tags", "b"),
    ]);
    assert_eq!(values, expected);
}

#[test]
fn test_columns_follow_first_write() {
    let (_, columns) = Encoder::default().encode_with_columns(&sample_person()).unwrap();
    assert_eq!(
        columns,
        vec![
            "name",
            "age",
            "active",
            "score",
            "address.street",
            "address.city",
            "addresses[0].street",
            "addresses[0].city",
            "tags"
        ]
    );
}

#[test]
fn test_typed_side_table() {
    let output = Encoder::default().encode_output(
        &sample_person(),
        EncodeOptions {
            columns: false,
            typed: true,
        },
    );
    assert!(output.is_ok());
    assert!(output.columns.is_none());
    let typed = output.typed.unwrap();
    assert_eq!(typed["name"], TypedValue::String("Bob".into()));
    assert_eq!(typed["age"], TypedValue::Uint(42));
    assert_eq!(typed["active"], TypedValue::Bool(true));
    assert_eq!(typed["score"], TypedValue::Float(0.1));
    assert_eq!(typed["tags"], TypedValue::String("b".into()));
}

#[test]
fn test_bracket_namespace() {
    let values = Encoder::default()
        .namespace("[", "]")
        .encode(&sample_person())
        .unwrap();
    assert_eq!(values["address[city]"], vec!["Oslo"]);
    assert_eq!(values["addresses[0][street]"], vec!["Via Roma"]);
}

#[derive(FormObject, Debug, Default, PartialEq)]
pub struct Base {
    pub id: u64,
    #[tag(form = "created_by")]
    pub creator: String,
}

#[derive(FormObject, Debug, Default, PartialEq)]
pub struct Order {
    #[form(embed)]
    pub base: Base,
    #[tag(form = "customer")]
    pub customer_name: String,
    #[tag(form = "-")]
    pub internal: String,
    secret: String,
    #[tag(form = "items,omitempty", collection_format = "csv")]
    pub items: Vec<String>,
    #[tag(form = "ids", collection_format = "pipes")]
    pub ids: Vec<u32>,
    #[tag(form = "note,omitempty")]
    pub note: Option<String>,
}

fn sample_order() -> Order {
    Order {
        base: Base {
            id: 7,
            creator: "ann".into(),
        },
        customer_name: "Bob".into(),
        internal: "x".into(),
        secret: "s".into(),
        items: vec!["a".into(), "b".into(), "c".into()],
        ids: vec![1, 2],
        note: None,
    }
}

#[test]
fn test_embedded_flattened_and_joined_lists() {
    let values = Encoder::default().encode(&sample_order()).unwrap();
    let expected = values_from_pairs([
        ("id", "7"),
        ("created_by", "ann"),
        ("customer", "Bob"),
        ("items", "a,b,c"),
        ("ids", "1|2"),
    ]);
    assert_eq!(values, expected);
}

#[test]
fn test_embedded_kept_under_field_name() {
    let values = Encoder::default()
        .embed_anonymous(false)
        .encode(&sample_order())
        .unwrap();
    assert_eq!(values["base.id"], vec!["7"]);
    assert_eq!(values["base.created_by"], vec!["ann"]);
    assert!(!values.contains_key("id"));
}

#[test]
fn test_omit_empty() {
    let order = Order {
        items: Vec::new(),
        note: Some(String::new()),
        ..sample_order()
    };
    let values = Encoder::default().encode(&order).unwrap();
    assert!(!values.contains_key("items"));
    // a present optional is not empty, even when it holds an empty string
    assert_eq!(values["note"], vec![""]);
}

#[test]
fn test_optionals_and_gaps() {
    #[derive(FormObject, Default)]
    pub struct Sparse {
        pub picks: Vec<Option<String>>,
        pub limit: Option<u32>,
        pub address: Option<Address>,
        pub boxed: Box<Address>,
    }

    let sparse = Sparse {
        picks: vec![Some("a".into()), None, Some("c".into())],
        limit: None,
        address: Some(Address {
            street: String::new(),
            city: "Oslo".into(),
        }),
        boxed: Box::new(Address {
            street: "Main".into(),
            city: String::new(),
        }),
    };
    let values = Encoder::default().encode(&sparse).unwrap();
    let expected = values_from_pairs([
        ("picks[0]", "a"),
        ("picks[2]", "c"),
        ("address.street", ""),
        ("address.city", "Oslo"),
        ("boxed.street", "Main"),
        ("boxed.city", ""),
    ]);
    assert_eq!(values, expected);
}

#[test]
fn test_nested_sequences() {
    #[derive(FormObject, Default)]
    pub struct Grid {
        pub rows: Vec<Vec<u32>>,
        pub fixed: [bool; 2],
        pub pages: Vec<BTreeMap<String, String>>,
    }

    let grid = Grid {
        rows: vec![vec![1, 2], vec![3]],
        fixed: [true, false],
        pages: vec![BTreeMap::from([("k".to_string(), "v".to_string())])],
    };
    let values = Encoder::default().encode(&grid).unwrap();
    let expected = values_from_pairs([
        ("rows[0][0]", "1"),
        ("rows[0][1]", "2"),
        ("rows[1][0]", "3"),
        ("fixed", "true"),
        ("fixed", "false"),
        ("pages[0][k]", "v"),
    ]);
    assert_eq!(values, expected);
}

#[test]
fn test_maps_sorted_by_key() {
    #[derive(FormObject, Default)]
    pub struct Catalog {
        pub prices: HashMap<String, f64>,
        pub ranks: BTreeMap<u32, String>,
        pub places: HashMap<String, Address>,
    }

    let catalog = Catalog {
        prices: HashMap::from([("pear".to_string(), 2.0), ("apple".to_string(), 1.25)]),
        ranks: BTreeMap::from([(10, "ten".to_string()), (9, "nine".to_string())]),
        places: HashMap::from([(
            "home".to_string(),
            Address {
                street: String::new(),
                city: "Oslo".into(),
            },
        )]),
    };
    let (values, columns) = Encoder::default().encode_with_columns(&catalog).unwrap();
    assert_eq!(values["prices[apple]"], vec!["1.25"]);
    assert_eq!(values["prices[pear]"], vec!["2"]);
    assert_eq!(values["ranks[9]"], vec!["nine"]);
    assert_eq!(values["places[home].city"], vec!["Oslo"]);
    assert_eq!(&columns[..2], &["prices[apple]".to_string(), "prices[pear]".to_string()]);
}

#[test]
fn test_unsupported_key_keeps_partial_output() {
    #[derive(FormObject, Default)]
    pub struct Bad {
        pub name: String,
        pub by_list: BTreeMap<Vec<u8>, String>,
    }

    let bad = Bad {
        name: "n".into(),
        by_list: BTreeMap::from([(vec![1u8], "v".to_string())]),
    };
    let encoder = Encoder::default();
    let errors = encoder.encode(&bad).unwrap_err();
    assert!(matches!(errors.get("by_list"), Some(Error::UnsupportedKey(_))));

    let output = encoder.encode_output(&bad, EncodeOptions::default());
    assert!(!output.is_ok());
    assert_eq!(output.values["name"], vec!["n"]);
    assert_eq!(output.values.len(), 1);
}

#[test]
fn test_timestamps() {
    #[derive(FormObject, Default)]
    pub struct Event {
        pub at: DateTime<Utc>,
        pub local: Option<DateTime<FixedOffset>>,
        pub when: Vec<DateTime<Utc>>,
    }

    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let local = FixedOffset::east_opt(7200)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .unwrap();
    let event = Event {
        at,
        local: Some(local),
        when: vec![at, at],
    };
    let output = Encoder::default().encode_output(
        &event,
        EncodeOptions {
            columns: false,
            typed: true,
        },
    );
    assert!(output.is_ok());
    assert_eq!(output.values["at"], vec!["2024-01-02T03:04:05Z"]);
    assert_eq!(output.values["local"], vec!["2024-01-02T03:04:05+02:00"]);
    assert_eq!(output.values["when[1]"], vec!["2024-01-02T03:04:05Z"]);
    assert_eq!(output.typed.unwrap()["local"], TypedValue::Timestamp(local));
}

#[test]
fn test_dynamic_values() {
    #[derive(FormObject, Default)]
    pub struct Loose {
        pub count: Dynamic,
        pub label: Dynamic,
        pub unknown: Dynamic,
        pub empty: Dynamic,
    }

    let loose = Loose {
        count: Dynamic::new(5i64),
        label: Dynamic::new("x".to_string()),
        unknown: Dynamic::new(3u8),
        empty: Dynamic::default(),
    };
    let values = Encoder::default().encode(&loose).unwrap();
    assert_eq!(values, values_from_pairs([("count", "5"), ("label", "x")]));
}

#[test]
fn test_top_level_none() {
    let errors = Encoder::default().encode(&Option::<Person>::None).unwrap_err();
    assert!(matches!(errors.get(""), Some(Error::InvalidEncode(_))));

    let values = Encoder::default().encode(&Some(Address::default())).unwrap();
    assert_eq!(values.len(), 2);
}

#[test]
fn test_encode_query() {
    #[derive(FormObject, Default)]
    pub struct Search {
        pub q: String,
        pub tags: Vec<String>,
        #[tag(form = "page,omitempty")]
        pub page: u32,
    }

    let search = Search {
        q: "rust lang".into(),
        tags: vec!["a".into(), "b".into()],
        page: 0,
    };
    let query = Encoder::default().encode_query(&search).unwrap();
    assert_eq!(query, "q=rust+lang&tags=a&tags=b");
}

#[test]
fn test_empty_record_encodes_nothing() {
    #[derive(FormObject, Default)]
    pub struct Nothing {}

    assert_eq!(Encoder::default().encode(&Nothing {}).unwrap(), Values::new());
}
