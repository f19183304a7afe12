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

use crate::codec::{decode_value, encode_value, FormDefault, FormValue};
use crate::error::Error;
use crate::resolver::context::{DecodeContext, EncodeContext};
use crate::resolver::shape::FieldMeta;
use crate::types::{index_namespace, FieldKind, Position};

impl<T> FormDefault for Vec<T> {
    #[inline(always)]
    fn form_default() -> Self {
        Vec::new()
    }
}

impl<T: FormValue> FormValue for Vec<T> {
    #[inline(always)]
    fn form_kind() -> FieldKind {
        FieldKind::List
    }

    fn form_decode(
        &mut self,
        ctx: &mut DecodeContext<'_>,
        namespace: &str,
        _idx: usize,
        _in_option: bool,
    ) -> bool {
        decode_list(self, ctx, namespace)
    }

    fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, position: Position) {
        encode_sequence(self.as_slice(), ctx, namespace, position);
    }

    #[inline(always)]
    fn form_has_value(&self) -> bool {
        !self.is_empty()
    }
}

/// Appends the values found under `namespace`, then assigns `namespace[i]`
/// entries by position, growing the list as needed.
fn decode_list<T: FormValue>(list: &mut Vec<T>, ctx: &mut DecodeContext<'_>, namespace: &str) -> bool {
    if !ctx.ensure_namespaces(namespace) {
        return false;
    }

    let mut set = false;
    let count = ctx.values(namespace).map_or(0, <[String]>::len);
    if count > 0 {
        let original = list.len();
        list.reserve(count);
        for i in 0..count {
            let mut element = T::form_default();
            if decode_value(&mut element, ctx, namespace, i, false) {
                set = true;
            }
            list.push(element);
        }
        if !set {
            list.truncate(original);
        }
    }

    let Some(alias) = ctx.alias(namespace) else {
        return set;
    };
    let Some(needed) = alias.max_index.checked_add(1) else {
        let err = Error::array_too_large(alias.max_index, ctx.max_array_size());
        ctx.set_error(namespace, err);
        return false;
    };
    let before = list.len();
    if before < needed {
        // growth within already reserved capacity is not limited
        if list.capacity() <= needed && needed > ctx.max_array_size() {
            let err = Error::array_too_large(needed, ctx.max_array_size());
            ctx.set_error(namespace, err);
            return false;
        }
        list.resize_with(needed, T::form_default);
    }

    let mut assigned = false;
    for entry in &alias.entries {
        let Some(index) = entry.index else {
            ctx.set_error(namespace, Error::invalid_index(&entry.key, "slice"));
            continue;
        };
        let mut element = T::form_default();
        let element_ns = format!("{}{}", namespace, entry.search_token);
        if decode_value(&mut element, ctx, &element_ns, 0, false) {
            list[index] = element;
            assigned = true;
        }
    }
    if !assigned {
        list.truncate(before);
    }
    set || assigned
}

/// Encodes a sequence at `position`.
///
/// As a field, elements are written at [`Position::Element`] so scalars repeat
/// the key and composites add their `[i]` segment. Deeper down every element
/// gets its own segment.
pub(crate) fn encode_sequence<T: FormValue>(
    items: &[T],
    ctx: &mut EncodeContext<'_>,
    namespace: &str,
    position: Position,
) {
    let element = FieldMeta::element();
    match position {
        Position::Field => {
            for (i, item) in items.iter().enumerate() {
                encode_value(item, ctx, namespace, Position::Element(i), &element);
            }
        }
        Position::Element(idx) => {
            let base = index_namespace(namespace, idx);
            for (i, item) in items.iter().enumerate() {
                encode_value(item, ctx, &index_namespace(&base, i), Position::Nested, &element);
            }
        }
        Position::Nested => {
            for (i, item) in items.iter().enumerate() {
                encode_value(item, ctx, &index_namespace(namespace, i), Position::Nested, &element);
            }
        }
    }
}
