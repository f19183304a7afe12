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

//! Keyed collections. Maps only decode from bracketed keys (`m[key]=v`); a
//! bare `m=v` has no key to bind to.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::codec::{decode_key, decode_value, encode_key, encode_value, FormDefault, FormValue};
use crate::resolver::context::{DecodeContext, EncodeContext};
use crate::resolver::shape::FieldMeta;
use crate::types::{key_namespace, FieldKind, Position};

trait MapTarget<K, V>: FormDefault {
    fn insert_entry(&mut self, key: K, value: V);
    fn has_entries(&self) -> bool;
}

impl<K: Eq + Hash, V, S: BuildHasher + Default> MapTarget<K, V> for HashMap<K, V, S> {
    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn has_entries(&self) -> bool {
        !self.is_empty()
    }
}

impl<K: Ord, V> MapTarget<K, V> for BTreeMap<K, V> {
    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn has_entries(&self) -> bool {
        !self.is_empty()
    }
}

/// Decodes every `namespace[key]` entry into a fresh map.
///
/// The result is committed only when the target map is empty; entries decoded
/// for a map that already holds data are dropped.
fn decode_map<M, K, V>(map: &mut M, ctx: &mut DecodeContext<'_>, namespace: &str) -> bool
where
    M: MapTarget<K, V>,
    K: FormValue,
    V: FormValue,
{
    if !ctx.ensure_namespaces(namespace) {
        return false;
    }
    let Some(alias) = ctx.alias(namespace) else {
        return false;
    };

    let mut staged = M::form_default();
    let mut set = false;
    for entry in &alias.entries {
        let key = match decode_key::<K>(ctx, &entry.key, namespace) {
            Ok(key) => key,
            Err(err) => {
                ctx.set_error(namespace, err);
                continue;
            }
        };
        let mut value = V::form_default();
        let entry_ns = format!("{}{}", namespace, entry.search_token);
        if decode_value(&mut value, ctx, &entry_ns, 0, false) {
            staged.insert_entry(key, value);
            set = true;
        }
    }

    if !set || map.has_entries() {
        return false;
    }
    *map = staged;
    true
}

/// Encodes entries as `namespace[key]`, in rendered key order when `sort` is set.
fn encode_map<'a, K, V, I>(
    entries: I,
    sort: bool,
    ctx: &mut EncodeContext<'_>,
    namespace: &str,
    position: Position,
) where
    K: FormValue,
    V: FormValue,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let base = position.apply(namespace);
    let mut rendered: Vec<(String, &V)> = entries
        .filter_map(|(k, v)| encode_key(ctx, k, &base).map(|key| (key, v)))
        .collect();
    if sort {
        rendered.sort_by(|a, b| a.0.cmp(&b.0));
    }
    let element = FieldMeta::element();
    for (key, value) in rendered {
        encode_value(value, ctx, &key_namespace(&base, &key), Position::Nested, &element);
    }
}

impl<K, V, S: Default> FormDefault for HashMap<K, V, S> {
    fn form_default() -> Self {
        HashMap::default()
    }
}

impl<K, V, S> FormValue for HashMap<K, V, S>
where
    K: FormValue + Eq + Hash,
    V: FormValue,
    S: BuildHasher + Default + 'static,
{
    #[inline(always)]
    fn form_kind() -> FieldKind {
        FieldKind::Map
    }

    fn form_decode(
        &mut self,
        ctx: &mut DecodeContext<'_>,
        namespace: &str,
        _idx: usize,
        _in_option: bool,
    ) -> bool {
        decode_map::<_, K, V>(self, ctx, namespace)
    }

    fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, position: Position) {
        encode_map(self.iter(), true, ctx, namespace, position);
    }

    #[inline(always)]
    fn form_has_value(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> FormDefault for BTreeMap<K, V> {
    fn form_default() -> Self {
        BTreeMap::new()
    }
}

impl<K, V> FormValue for BTreeMap<K, V>
where
    K: FormValue + Ord,
    V: FormValue,
{
    #[inline(always)]
    fn form_kind() -> FieldKind {
        FieldKind::Map
    }

    fn form_decode(
        &mut self,
        ctx: &mut DecodeContext<'_>,
        namespace: &str,
        _idx: usize,
        _in_option: bool,
    ) -> bool {
        decode_map::<_, K, V>(self, ctx, namespace)
    }

    fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, position: Position) {
        encode_map(self.iter(), false, ctx, namespace, position);
    }

    #[inline(always)]
    fn form_has_value(&self) -> bool {
        !self.is_empty()
    }
}
