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

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use crate::codec::FormRecord;
use crate::config::Config;
use crate::encoder::TypedValue;
use crate::error::{Error, ErrorSet};
use crate::resolver::namespace::{max_key_len, parse_namespaces, AliasIndex, NamespaceIndex};
use crate::resolver::registry::{CustomDecoders, CustomEncoders, DecodeFn, EncodeFn};
use crate::resolver::shape::{RecordShape, ShapeCache};
use crate::values::Values;

/// State of a single decode call.
pub struct DecodeContext<'de> {
    values: &'de Values,
    /// Values rewritten by list separators, shadowing `values`.
    split: HashMap<String, Vec<String>>,
    /// Parsed on first use.
    namespaces: Option<NamespaceIndex>,
    config: &'de Config,
    shapes: &'de ShapeCache,
    customs: &'de CustomDecoders,
    /// Decoded top level fields by wire name, when requested.
    typed: Option<BTreeMap<String, TypedValue>>,
    errors: ErrorSet,
}

/// Everything a decode call produced besides the target value.
pub struct DecodeParts {
    pub typed: Option<BTreeMap<String, TypedValue>>,
    pub errors: ErrorSet,
}

impl<'de> DecodeContext<'de> {
    pub fn new(
        values: &'de Values,
        config: &'de Config,
        shapes: &'de ShapeCache,
        customs: &'de CustomDecoders,
    ) -> DecodeContext<'de> {
        DecodeContext {
            values,
            split: HashMap::new(),
            namespaces: None,
            config,
            shapes,
            customs,
            typed: None,
            errors: ErrorSet::new(),
        }
    }

    /// Also collects the typed values of decoded top level fields.
    pub fn with_typed(mut self) -> Self {
        self.typed = Some(BTreeMap::new());
        self
    }

    #[inline(always)]
    pub fn collects_typed(&self) -> bool {
        self.typed.is_some()
    }

    pub fn set_typed<S: Into<String>>(&mut self, name: S, value: TypedValue) {
        if let Some(table) = self.typed.as_mut() {
            table.insert(name.into(), value);
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &'de Config {
        self.config
    }

    /// All values received under `namespace`.
    #[inline(always)]
    pub fn values(&self, namespace: &str) -> Option<&[String]> {
        if !self.split.is_empty() {
            if let Some(vals) = self.split.get(namespace) {
                return Some(vals);
            }
        }
        self.values.get(namespace).map(Vec::as_slice)
    }

    /// The `idx`-th value under `namespace`.
    #[inline(always)]
    pub fn value_at(&self, namespace: &str, idx: usize) -> Option<&str> {
        self.values(namespace)
            .and_then(|vals| vals.get(idx))
            .map(String::as_str)
    }

    #[inline(always)]
    pub fn has_values(&self, namespace: &str) -> bool {
        self.values(namespace).is_some()
    }

    /// Whether any received key starts with `namespace`.
    pub fn has_keys_under(&self, namespace: &str) -> bool {
        self.values
            .range::<str, _>((Bound::Included(namespace), Bound::Unbounded))
            .next()
            .map_or(false, |(key, _)| key.starts_with(namespace))
    }

    /// Replaces the single value under `namespace` by its `separator`-split parts.
    pub fn split_values(&mut self, namespace: &str, separator: u8) {
        let parts: Vec<String> = match self.values(namespace).and_then(|vals| vals.first()) {
            Some(first) => first
                .split(char::from(separator))
                .map(str::to_string)
                .collect(),
            None => return,
        };
        self.split.insert(namespace.to_string(), parts);
    }

    /// Parses the bracket index of the call on first use.
    ///
    /// A parse failure is recorded at `namespace` and reported once; later
    /// calls see an index without aliases.
    pub fn ensure_namespaces(&mut self, namespace: &str) -> bool {
        if self.namespaces.is_some() {
            return true;
        }
        let keys = self.values.keys().map(String::as_str);
        match parse_namespaces(keys) {
            Ok(index) => {
                tracing::trace!(aliases = index.len(), "parsed form namespaces");
                self.namespaces = Some(index);
                true
            }
            Err(err) => {
                tracing::debug!(namespace, error = %err, "failed to parse form namespaces");
                let longest = max_key_len(self.values.keys().map(String::as_str));
                self.namespaces = Some(NamespaceIndex::empty(longest));
                self.set_error(namespace, err);
                false
            }
        }
    }

    #[inline(always)]
    pub fn alias(&self, namespace: &str) -> Option<Arc<AliasIndex>> {
        self.namespaces.as_ref().and_then(|index| index.alias(namespace))
    }

    #[inline(always)]
    pub fn max_key_len(&self) -> usize {
        self.namespaces
            .as_ref()
            .map(NamespaceIndex::max_key_len)
            .unwrap_or(0)
    }

    #[inline(always)]
    pub fn max_array_size(&self) -> usize {
        self.config.max_array_size
    }

    #[inline(always)]
    pub fn custom_decoder(&self, type_id: TypeId) -> Option<&'de DecodeFn> {
        self.customs.get(type_id)
    }

    #[inline(always)]
    pub fn shape_of<T: FormRecord>(&self) -> Arc<RecordShape> {
        self.shapes.shape_of::<T>()
    }

    pub fn set_error<S: Into<String>>(&mut self, namespace: S, err: Error) {
        self.errors.insert(namespace, err);
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorSet {
        self.errors
    }

    pub fn into_parts(self) -> DecodeParts {
        DecodeParts {
            typed: self.typed,
            errors: self.errors,
        }
    }
}

/// State of a single encode call.
pub struct EncodeContext<'en> {
    config: &'en Config,
    shapes: &'en ShapeCache,
    customs: &'en CustomEncoders,
    values: Values,
    /// Keys in the order they were first written.
    columns: Option<Vec<String>>,
    typed: Option<BTreeMap<String, TypedValue>>,
    errors: ErrorSet,
}

/// Everything an encode call produced.
pub struct EncodeParts {
    pub values: Values,
    pub columns: Option<Vec<String>>,
    pub typed: Option<BTreeMap<String, TypedValue>>,
    pub errors: ErrorSet,
}

impl<'en> EncodeContext<'en> {
    pub fn new(
        config: &'en Config,
        shapes: &'en ShapeCache,
        customs: &'en CustomEncoders,
        with_columns: bool,
        with_typed: bool,
    ) -> EncodeContext<'en> {
        EncodeContext {
            config,
            shapes,
            customs,
            values: Values::new(),
            columns: with_columns.then(Vec::new),
            typed: with_typed.then(BTreeMap::new),
            errors: ErrorSet::new(),
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &'en Config {
        self.config
    }

    #[inline(always)]
    pub fn custom_encoder(&self, type_id: TypeId) -> Option<&'en EncodeFn> {
        self.customs.get(type_id)
    }

    #[inline(always)]
    pub fn shape_of<T: FormRecord>(&self) -> Arc<RecordShape> {
        self.shapes.shape_of::<T>()
    }

    /// Appends `text` under `namespace`; `typed` is only evaluated when the
    /// typed side-table is collected.
    pub fn set_val<F: FnOnce(&str) -> TypedValue>(&mut self, namespace: String, text: String, typed: F) {
        if let Some(table) = self.typed.as_mut() {
            table.insert(namespace.clone(), typed(&text));
        }
        match self.values.get_mut(&namespace) {
            Some(vals) => vals.push(text),
            None => {
                if let Some(columns) = self.columns.as_mut() {
                    columns.push(namespace.clone());
                }
                self.values.insert(namespace, vec![text]);
            }
        }
    }

    /// Collapses the values under `namespace` into one, joined by `separator`.
    pub fn join_values(&mut self, namespace: &str, separator: u8) {
        if let Some(vals) = self.values.get_mut(namespace) {
            if !vals.is_empty() {
                let separator = char::from(separator).to_string();
                let joined = vals.join(separator.as_str());
                *vals = vec![joined];
            }
        }
    }

    pub fn set_error<S: Into<String>>(&mut self, namespace: S, err: Error) {
        self.errors.insert(namespace, err);
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn into_parts(self) -> EncodeParts {
        EncodeParts {
            values: self.values,
            columns: self.columns,
            typed: self.typed,
            errors: self.errors,
        }
    }
}
