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

//! Flat form values to typed values.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::codec::FormValue;
use crate::config::{Config, Mode, TagNameFn};
use crate::encoder::TypedValue;
use crate::error::{BoxError, DecodeErrors};
use crate::resolver::context::DecodeContext;
use crate::resolver::registry::CustomDecoders;
use crate::resolver::shape::{FieldDecl, ShapeCache};
use crate::values::{parse_query, Values};

/// Extra outputs collected by [`Decoder::decode_output`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Record the decoded value of every assigned top level field.
    pub typed: bool,
}

/// What a single decode produced besides the target value.
#[derive(Debug, Default)]
pub struct DecodeOutput {
    /// Top level fields by wire name. Fields without a single typed value,
    /// such as lists, maps and nested records, are not listed.
    pub typed: Option<BTreeMap<String, TypedValue>>,
    pub errors: DecodeErrors,
}

impl DecodeOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Decodes [`Values`] into typed values.
///
/// Decoding never stops at the first problem: every field that can be bound
/// is bound, and failures are collected per namespace in the returned
/// [`DecodeErrors`].
///
/// ```rust, ignore
/// use formbind::{values_from_pairs, Decoder, FormObject};
///
/// #[derive(FormObject, Default)]
/// struct Address {
///     city: String,
/// }
///
/// #[derive(FormObject, Default)]
/// struct User {
///     name: String,
///     addresses: Vec<Address>,
/// }
///
/// let values = values_from_pairs([("name", "Bob"), ("addresses[1].city", "Oslo")]);
/// let mut user = User::default();
/// Decoder::default().decode(&mut user, &values).unwrap();
/// assert_eq!(user.addresses.len(), 2);
/// assert_eq!(user.addresses[1].city, "Oslo");
/// ```
#[derive(Clone, Debug)]
pub struct Decoder {
    config: Config,
    shapes: Arc<ShapeCache>,
    customs: CustomDecoders,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::with_config(Config::default())
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Decoder {
            shapes: Arc::new(ShapeCache::new(&config)),
            config,
            customs: CustomDecoders::default(),
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

    /// Sets the text expected before and after nested field names.
    pub fn namespace<P: Into<String>, S: Into<String>>(mut self, prefix: P, suffix: S) -> Self {
        self.config.namespace_prefix = prefix.into();
        self.config.namespace_suffix = suffix.into();
        self
    }

    /// Caps how far a list may grow through an explicit index.
    pub fn max_array_size(mut self, max_array_size: usize) -> Self {
        self.config.max_array_size = max_array_size;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decodes values of type `T` through `f`, ahead of any built-in handling.
    pub fn register_func<T, F, E>(&mut self, f: F)
    where
        T: Send + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.customs.register::<T, F, E>(f);
    }

    /// Decodes `values` into `value`. Fields without input keep what they hold.
    pub fn decode<T: FormValue>(&self, value: &mut T, values: &Values) -> Result<(), DecodeErrors> {
        self.decode_output(value, values, DecodeOptions::default())
            .errors
            .into_result()
    }

    /// Decodes `values` into `value`, returning the errors next to the
    /// requested extra outputs.
    pub fn decode_output<T: FormValue>(&self, value: &mut T, values: &Values, options: DecodeOptions) -> DecodeOutput {
        let mut ctx = DecodeContext::new(values, &self.config, &self.shapes, &self.customs);
        if options.typed {
            ctx = ctx.with_typed();
        }
        value.form_decode_root(&mut ctx);
        let parts = ctx.into_parts();
        tracing::trace!(
            target: "formbind::decode",
            keys = values.len(),
            errors = parts.errors.len(),
            "decoded {}",
            std::any::type_name::<T>()
        );
        DecodeOutput {
            typed: parts.typed,
            errors: parts.errors,
        }
    }

    /// Decodes into a fresh zero value of `T`.
    pub fn decode_new<T: FormValue>(&self, values: &Values) -> Result<T, DecodeErrors> {
        let mut value = T::form_default();
        self.decode(&mut value, values)?;
        Ok(value)
    }

    /// Decodes an `application/x-www-form-urlencoded` body or query string.
    pub fn decode_query<T: FormValue>(&self, value: &mut T, query: &str) -> Result<(), DecodeErrors> {
        let values = parse_query(query).map_err(|e| {
            let mut errors = DecodeErrors::new();
            errors.insert("", e);
            errors
        })?;
        self.decode(value, &values)
    }

    fn reset_shapes(&mut self) {
        self.shapes = Arc::new(ShapeCache::new(&self.config));
    }
}
