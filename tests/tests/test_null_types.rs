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

use formbind_core::codec::null::{
    register_null_types_decode, register_null_types_encode, NullBool, NullFloat64, NullInt64, NullString,
};
use formbind_core::decoder::Decoder;
use formbind_core::encoder::Encoder;
use formbind_core::error::Error;
use formbind_core::values::values_from_pairs;
use formbind_derive::FormObject;

#[derive(FormObject, Debug, Default, PartialEq)]
pub struct Row {
    pub name: NullString,
    pub count: NullInt64,
    pub ratio: NullFloat64,
    pub done: NullBool,
    pub history: Vec<NullInt64>,
}

fn null_decoder(sentinels: &[&str]) -> Decoder {
    let mut decoder = Decoder::default();
    register_null_types_decode(&mut decoder, sentinels);
    decoder
}

#[test]
fn test_decode_values_and_default_sentinel() {
    let values = values_from_pairs([
        ("name", "NULL"),
        ("count", "12"),
        ("ratio", "0.5"),
        ("done", "yes"),
        ("history", "1"),
        ("history", "NULL"),
    ]);
    let mut row = Row::default();
    null_decoder(&[]).decode(&mut row, &values).unwrap();
    assert_eq!(row.name, NullString::null());
    assert_eq!(row.count, NullInt64::new(12));
    assert_eq!(row.ratio, NullFloat64::new(0.5));
    assert_eq!(row.done, NullBool::new(true));
    assert_eq!(row.history, vec![NullInt64::new(1), NullInt64::null()]);
}

#[test]
fn test_custom_sentinels() {
    let values = values_from_pairs([("name", "nil"), ("count", "-"), ("done", "NULL")]);
    let mut row = Row::default();
    let errors = null_decoder(&["nil", "-"]).decode(&mut row, &values).unwrap_err();
    assert_eq!(row.name, NullString::null());
    assert_eq!(row.count, NullInt64::null());
    // NULL is no longer a sentinel and is not a boolean either
    assert!(matches!(errors.get("done"), Some(Error::Conversion(_))));
}

#[test]
fn test_decode_errors() {
    let values = values_from_pairs([("count", "x"), ("ratio", ""), ("name", "")]);
    let mut row = Row::default();
    let errors = null_decoder(&[]).decode(&mut row, &values).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.contains("count"));
    assert_eq!(errors.get("ratio").unwrap().to_string(), "no value received");
    assert_eq!(row.name, NullString::new(String::new()));
}

#[test]
fn test_encode() {
    let row = Row {
        name: NullString::new("ann".into()),
        count: NullInt64::null(),
        ratio: NullFloat64::new(2.0),
        done: NullBool::new(false),
        history: vec![NullInt64::new(3), NullInt64::null()],
    };
    let mut encoder = Encoder::default();
    register_null_types_encode(&mut encoder, "NULL");
    let values = encoder.encode(&row).unwrap();
    let expected = values_from_pairs([
        ("name", "ann"),
        ("count", "NULL"),
        ("ratio", "2"),
        ("done", "false"),
        ("history[0]", "3"),
        ("history[1]", "NULL"),
    ]);
    assert_eq!(values, expected);

    let mut decoded = Row::default();
    null_decoder(&[]).decode(&mut decoded, &values).unwrap();
    assert_eq!(decoded, row);
}
