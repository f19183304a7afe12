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

//! Typed values to flat form values.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::codec::FormValue;
use crate::config::{Config, Mode, TagNameFn};
use crate::error::{BoxError, EncodeErrors};
use crate::resolver::context::EncodeContext;
use crate::resolver::registry::CustomEncoders;
use crate::resolver::shape::{FieldDecl, ShapeCache};
use crate::values::{to_query, Values};

/// The typed value behind an encoded text, recorded in the typed side-table.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<FixedOffset>),
    /// Text produced by a conversion function or a text codec.
    Opaque { type_name: &'static str, text: String },
}

/// Extra outputs collected by [`Encoder::encode_output`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Record keys in first-write order.
    pub columns: bool,
    /// Record the typed value of the last write to every key.
    pub typed: bool,
}

/// Everything a single encode produced, errors included.
#[derive(Debug, Default)]
pub struct EncodeOutput {
    pub values: Values,
    pub columns: Option<Vec<String>>,
    pub typed: Option<BTreeMap<String, TypedValue>>,
    pub errors: EncodeErrors,
}

impl EncodeOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Encodes values into [`Values`].
///
/// An encoder is cheap to clone and safe to share between threads; derived
/// record shapes are cached across calls.
///
/// ```rust, ignore
/// use formbind::{Encoder, FormObject};
///
/// #[derive(FormObject, Default)]
/// struct Search {
///     q: String,
///     #[tag(form = "page,omitempty")]
///     page: u32,
/// }
///
/// let values = Encoder::default().encode(&Search { q: "rust".into(), page: 0 }).unwrap();
/// assert_eq!(values["q"], vec!["rust"]);
/// assert!(!values.contains_key("page"));
/// ```
#[derive(Clone, Debug)]
pub struct Encoder {
    config: Config,
    shapes: Arc<ShapeCache>,
    customs: CustomEncoders,
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder::with_config(Config::default())
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Encoder {
            shapes: Arc::new(ShapeCache::new(&config)),
            config,
            customs: CustomEncoders::default(),
        }
    }

    /// Sets the tag key field names are read from, `form` by default.
    pub fn tag_name<S: Into<String>>(mut self, tag_name: S) -> Self {
        self.config.tag_name = tag_name.into();
        self.reset_shapes();
        self
    }

    /// Derives field names through `f` instead of the tag key.
    pub fn tag_name_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldDecl) -> String + Send + Sync + 'static,
    {
        let f: TagNameFn = Arc::new(f);
        self.config.tag_name_fn = Some(f);
        self.reset_shapes();
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self.reset_shapes();
        self
    }

    /// Sets the text placed before and after nested field names.
    pub fn namespace<P: Into<String>, S: Into<String>>(mut self, prefix: P, suffix: S) -> Self {
        self.config.namespace_prefix = prefix.into();
        self.config.namespace_suffix = suffix.into();
        self
    }

    /// When disabled, embedded records are written under their own field name.
    pub fn embed_anonymous(mut self, embed_anonymous: bool) -> Self {
        self.config.embed_anonymous = embed_anonymous;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encodes values of type `T` through `f`, ahead of any built-in handling.
    pub fn register_func<T, F, E>(&mut self, f: F)
    where
        T: 'static,
        F: Fn(&T) -> Result<String, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.customs.register::<T, F, E>(f);
    }

    /// Encodes `value`, failing if any field could not be encoded.
    pub fn encode<T: FormValue>(&self, value: &T) -> Result<Values, EncodeErrors> {
        let output = self.encode_output(value, EncodeOptions::default());
        output.errors.into_result()?;
        Ok(output.values)
    }

    /// Like [`encode`](Self::encode), also returning keys in first-write order.
    pub fn encode_with_columns<T: FormValue>(&self, value: &T) -> Result<(Values, Vec<String>), EncodeErrors> {
        let output = self.encode_output(
            value,
            EncodeOptions {
                columns: true,
                typed: false,
            },
        );
        output.errors.into_result()?;
        Ok((output.values, output.columns.unwrap_or_default()))
    }

    /// Encodes `value` keeping whatever was produced next to the errors.
    pub fn encode_output<T: FormValue>(&self, value: &T, options: EncodeOptions) -> EncodeOutput {
        let mut ctx = EncodeContext::new(&self.config, &self.shapes, &self.customs, options.columns, options.typed);
        value.form_encode_root(&mut ctx);
        let parts = ctx.into_parts();
        tracing::trace!(
            target: "formbind::encode",
            keys = parts.values.len(),
            errors = parts.errors.len(),
            "encoded {}",
            std::any::type_name::<T>()
        );
        EncodeOutput {
            values: parts.values,
            columns: parts.columns,
            typed: parts.typed,
            errors: parts.errors,
        }
    }

    /// Encodes `value` as `application/x-www-form-urlencoded` text.
    pub fn encode_query<T: FormValue>(&self, value: &T) -> Result<String, EncodeErrors> {
        let values = self.encode(value)?;
        to_query(&values).map_err(|e| {
            let mut errors = EncodeErrors::new();
            errors.insert("", e);
            errors
        })
    }

    fn reset_shapes(&mut self) {
        self.shapes = Arc::new(ShapeCache::new(&self.config));
    }
}
