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

//! The flat representation both directions of the codec work on.

use std::collections::BTreeMap;

use crate::error::Error;

/// Flat key-value form data: every key maps to the ordered list of values
/// received (or produced) for it.
pub type Values = BTreeMap<String, Vec<String>>;

/// Builds [`Values`] from `(key, value)` pairs, keeping repeated keys in order.
///
/// ```
/// use formbind_core::values::values_from_pairs;
///
/// let values = values_from_pairs([("tags", "a"), ("tags", "b"), ("name", "x")]);
/// assert_eq!(values["tags"], vec!["a", "b"]);
/// ```
pub fn values_from_pairs<I, K, V>(pairs: I) -> Values
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut values = Values::new();
    for (k, v) in pairs {
        values.entry(k.into()).or_default().push(v.into());
    }
    values
}

/// Parses an `application/x-www-form-urlencoded` body or query string.
pub fn parse_query(query: &str) -> Result<Values, Error> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(query).map_err(|e| Error::url_encoding(e.to_string()))?;
    Ok(values_from_pairs(pairs))
}

/// Renders values as `application/x-www-form-urlencoded` text, keys in order.
pub fn to_query(values: &Values) -> Result<String, Error> {
    let pairs: Vec<(&str, &str)> = values
        .iter()
        .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
        .collect();
    serde_urlencoded::to_string(pairs).map_err(|e| Error::url_encoding(e.to_string()))
}
