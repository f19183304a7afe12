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

//! Error types of the form codec.
//!
//! Every failure the decoder or encoder meets while walking a value is scoped
//! to the namespace (the flat key path) where it happened. Failures never stop
//! the walk: they are collected into an [`ErrorSet`] that is returned when the
//! call completes.
//!
//! Construct [`Error`] through its static functions so the
//! `FORMBIND_PANIC_ON_ERROR` debugging switch is honored.

use std::borrow::Cow;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Boxed error returned by user supplied conversion functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Set `FORMBIND_PANIC_ON_ERROR` at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("FORMBIND_PANIC_ON_ERROR").is_some();

/// Check if FORMBIND_PANIC_ON_ERROR environment variable is set.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error recorded against a single namespace.
///
/// Do not construct the variants directly, use the static constructor
/// functions ([`Error::type_mismatch`], [`Error::array_too_large`], ...).
///
/// ```bash
/// RUST_BACKTRACE=1 FORMBIND_PANIC_ON_ERROR=1 cargo test
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A flat key with unbalanced brackets.
    #[error("invalid formatting for key '{key}' missing '{missing}' bracket")]
    MalformedNamespace { key: String, missing: char },

    /// A scalar whose text cannot be parsed into the declared type.
    #[error("invalid {what} value '{value}' type '{type_name}' namespace '{namespace}'")]
    TypeMismatch {
        what: &'static str,
        value: String,
        type_name: &'static str,
        namespace: String,
    },

    /// A registered conversion function or text codec failed.
    #[error("{0}")]
    Conversion(BoxError),

    /// A positional index asks for more elements than the configured ceiling.
    #[error("array size of '{size}' is larger than the maximum currently set on the decoder of '{max}'")]
    ArrayTooLarge { size: usize, max: usize },

    /// A bracket segment that is not a number where a position was expected.
    #[error("invalid {container} index '{index}'")]
    InvalidIndex {
        index: String,
        container: &'static str,
    },

    /// A map key whose type has no textual form.
    #[error("{0}")]
    UnsupportedKey(Cow<'static, str>),

    /// A value that cannot be encoded at all, such as a top level `None`.
    #[error("{0}")]
    InvalidEncode(Cow<'static, str>),

    /// The query string helpers failed to parse or render text.
    #[error("{0}")]
    UrlEncoding(Cow<'static, str>),
}

impl Error {
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn malformed_namespace<S: Into<String>>(key: S, missing: char) -> Self {
        let err = Error::MalformedNamespace {
            key: key.into(),
            missing,
        };
        if PANIC_ON_ERROR {
            panic!("FORMBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::TypeMismatch`].
    ///
    /// `what` names the family of the expected type (`"integer"`,
    /// `"unsigned integer"`, `"float"`, `"boolean"`, `"timestamp"`).
    ///
    /// # Example
    /// ```
    /// use formbind_core::error::Error;
    ///
    /// let err = Error::type_mismatch("integer", "abc", "i32", "age");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid integer value 'abc' type 'i32' namespace 'age'"
    /// );
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn type_mismatch<V: Into<String>, N: Into<String>>(
        what: &'static str,
        value: V,
        type_name: &'static str,
        namespace: N,
    ) -> Self {
        let err = Error::TypeMismatch {
            what,
            value: value.into(),
            type_name,
            namespace: namespace.into(),
        };
        if PANIC_ON_ERROR {
            panic!("FORMBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Conversion`] from anything convertible into a boxed error,
    /// including `String`, `&str` and `anyhow::Error`.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn conversion<E: Into<BoxError>>(source: E) -> Self {
        let err = Error::Conversion(source.into());
        if PANIC_ON_ERROR {
            panic!("FORMBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn array_too_large(size: usize, max: usize) -> Self {
        let err = Error::ArrayTooLarge { size, max };
        if PANIC_ON_ERROR {
            panic!("FORMBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidIndex`]; `container` is `"slice"` or `"array"`.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_index<S: Into<String>>(index: S, container: &'static str) -> Self {
        let err = Error::InvalidIndex {
            index: index.into(),
            container,
        };
        if PANIC_ON_ERROR {
            panic!("FORMBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unsupported_key<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::UnsupportedKey(s.into());
        if PANIC_ON_ERROR {
            panic!("FORMBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_encode<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidEncode(s.into());
        if PANIC_ON_ERROR {
            panic!("FORMBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn url_encoding<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::UrlEncoding(s.into());
        if PANIC_ON_ERROR {
            panic!("FORMBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }
}

/// Errors of one decode or encode call, keyed by namespace.
///
/// Only the last error recorded for a namespace is kept. Iteration is in
/// namespace order.
#[derive(Debug, Default)]
pub struct ErrorSet(BTreeMap<String, Error>);

/// Errors collected while decoding.
pub type DecodeErrors = ErrorSet;

/// Errors collected while encoding.
pub type EncodeErrors = ErrorSet;

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `err` at `namespace`, replacing any earlier error there.
    pub fn insert<S: Into<String>>(&mut self, namespace: S, err: Error) {
        self.0.insert(namespace.into(), err);
    }

    pub fn get(&self, namespace: &str) -> Option<&Error> {
        self.0.get(namespace)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.0.contains_key(namespace)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Error> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, Error> {
        self.0
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ErrorSet> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (namespace, err)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "Field Namespace:{} ERROR:{}", namespace, err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorSet {}

impl IntoIterator for ErrorSet {
    type Item = (String, Error);
    type IntoIter = btree_map::IntoIter<String, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorSet {
    type Item = (&'a String, &'a Error);
    type IntoIter = btree_map::Iter<'a, String, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
