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

use formbind_core::decoder::Decoder;
use formbind_core::values::values_from_pairs;
use formbind_derive::FormObject;
use tracing_test::traced_test;

#[derive(FormObject, Debug, Default)]
pub struct Fixed {
    pub slots: [u8; 2],
}

#[test]
#[traced_test]
fn test_excess_values_are_dropped_with_warning() {
    let values = values_from_pairs([("slots", "1"), ("slots", "2"), ("slots", "3")]);
    let mut fixed = Fixed::default();
    Decoder::default().decode(&mut fixed, &values).unwrap();
    assert_eq!(fixed.slots, [1, 2]);
    assert!(logs_contain("more form values than array capacity"));
}

#[test]
#[traced_test]
fn test_excess_index_is_dropped_with_warning() {
    let values = values_from_pairs([("slots[0]", "4"), ("slots[9]", "5")]);
    let mut fixed = Fixed::default();
    Decoder::default().decode(&mut fixed, &values).unwrap();
    assert_eq!(fixed.slots, [4, 0]);
    assert!(logs_contain("form array index beyond array capacity"));
}

#[test]
#[traced_test]
fn test_in_range_values_do_not_warn() {
    let values = values_from_pairs([("slots", "1"), ("slots[1]", "2")]);
    let mut fixed = Fixed::default();
    Decoder::default().decode(&mut fixed, &values).unwrap();
    assert_eq!(fixed.slots, [1, 2]);
    assert!(!logs_contain("WARN"));
}
