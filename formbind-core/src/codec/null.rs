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

//! Nullable scalars in the style of SQL null wrappers.
//!
//! These types carry no built-in binding; they are handled entirely by the
//! conversion functions installed with [`register_null_types_decode`] and
//! [`register_null_types_encode`], which map a sentinel text to the null state.

use std::sync::Arc;

use crate::codec::bool::parse_bool;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::BoxError;
use crate::impl_form_custom;

/// Sentinel recognized on decode when none is given.
pub const DEFAULT_NULL_SENTINEL: &str = "NULL";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NullString {
    pub value: String,
    pub valid: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullInt64 {
    pub value: i64,
    pub valid: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NullFloat64 {
    pub value: f64,
    pub valid: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullBool {
    pub value: bool,
    pub valid: bool,
}

macro_rules! impl_null_ctor {
    ($($ty:ident: $inner:ty),+ $(,)?) => {
        $(
            impl $ty {
                pub fn new(value: $inner) -> Self {
                    $ty { value, valid: true }
                }

                pub fn null() -> Self {
                    Self::default()
                }

                pub fn get(&self) -> Option<&$inner> {
                    self.valid.then_some(&self.value)
                }
            }

            impl_form_custom!($ty);
        )+
    };
}

impl_null_ctor!(NullString: String, NullInt64: i64, NullFloat64: f64, NullBool: bool);

/// Installs decode functions for the null types on `decoder`.
///
/// A value equal to one of `sentinels` (`NULL` when empty) decodes to the
/// null state.
pub fn register_null_types_decode(decoder: &mut Decoder, sentinels: &[&str]) {
    let sentinels: Arc<[String]> = if sentinels.is_empty() {
        Arc::from(vec![DEFAULT_NULL_SENTINEL.to_string()])
    } else {
        sentinels.iter().map(|s| s.to_string()).collect()
    };

    let nulls = sentinels.clone();
    decoder.register_func(move |text: &str| -> Result<NullString, BoxError> {
        if is_null(&nulls, text) {
            return Ok(NullString::null());
        }
        Ok(NullString::new(text.to_string()))
    });

    let nulls = sentinels.clone();
    decoder.register_func(move |text: &str| -> Result<NullInt64, BoxError> {
        if is_null(&nulls, text) {
            return Ok(NullInt64::null());
        }
        Ok(NullInt64::new(text.parse::<i64>()?))
    });

    let nulls = sentinels.clone();
    decoder.register_func(move |text: &str| -> Result<NullFloat64, BoxError> {
        if text.is_empty() {
            return Err("no value received".into());
        }
        if is_null(&nulls, text) {
            return Ok(NullFloat64::null());
        }
        Ok(NullFloat64::new(text.parse::<f64>()?))
    });

    let nulls = sentinels;
    decoder.register_func(move |text: &str| -> Result<NullBool, BoxError> {
        if is_null(&nulls, text) {
            return Ok(NullBool::null());
        }
        match parse_bool(text) {
            Some(b) => Ok(NullBool::new(b)),
            None => Err(format!("invalid bool value '{text}'").into()),
        }
    });
}

/// Installs encode functions for the null types on `encoder`; the null state
/// is written as `sentinel`.
pub fn register_null_types_encode(encoder: &mut Encoder, sentinel: &str) {
    let null: Arc<str> = Arc::from(sentinel);

    let s = null.clone();
    encoder.register_func(move |v: &NullString| -> Result<String, BoxError> {
        Ok(v.get().cloned().unwrap_or_else(|| s.to_string()))
    });

    let s = null.clone();
    encoder.register_func(move |v: &NullInt64| -> Result<String, BoxError> {
        Ok(v.get().map_or_else(|| s.to_string(), |i| i.to_string()))
    });

    let s = null.clone();
    encoder.register_func(move |v: &NullFloat64| -> Result<String, BoxError> {
        Ok(v.get().map_or_else(|| s.to_string(), |f| f.to_string()))
    });

    let s = null;
    encoder.register_func(move |v: &NullBool| -> Result<String, BoxError> {
        Ok(v.get().map_or_else(|| s.to_string(), |b| b.to_string()))
    });
}

#[inline(always)]
fn is_null(sentinels: &[String], text: &str) -> bool {
    sentinels.iter().any(|s| s == text)
}
