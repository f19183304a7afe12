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

use crate::codec::list::encode_sequence;
use crate::codec::{decode_value, FormDefault, FormValue};
use crate::error::Error;
use crate::resolver::context::{DecodeContext, EncodeContext};
use crate::types::{FieldKind, Position};

impl<T: FormDefault, const N: usize> FormDefault for [T; N] {
    fn form_default() -> Self {
        std::array::from_fn(|_| T::form_default())
    }
}

impl<T: FormValue, const N: usize> FormValue for [T; N] {
    #[inline(always)]
    fn form_kind() -> FieldKind {
        FieldKind::FixedList
    }

    fn form_decode(
        &mut self,
        ctx: &mut DecodeContext<'_>,
        namespace: &str,
        _idx: usize,
        _in_option: bool,
    ) -> bool {
        decode_array(self, ctx, namespace)
    }

    fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, position: Position) {
        encode_sequence(self.as_slice(), ctx, namespace, position);
    }

    fn form_has_value(&self) -> bool {
        self.iter().any(FormValue::form_has_value)
    }
}

/// Like list decoding, but values beyond the fixed length are dropped.
fn decode_array<T: FormValue, const N: usize>(
    array: &mut [T; N],
    ctx: &mut DecodeContext<'_>,
    namespace: &str,
) -> bool {
    if !ctx.ensure_namespaces(namespace) {
        return false;
    }

    let mut set = false;
    let count = ctx.values(namespace).map_or(0, <[String]>::len);
    if count > 0 {
        if count > N {
            tracing::warn!(
                namespace,
                received = count,
                capacity = N,
                "more form values than array capacity, ignoring overflow values"
            );
        }
        for (i, slot) in array.iter_mut().enumerate().take(count) {
            let mut element = T::form_default();
            if decode_value(&mut element, ctx, namespace, i, false) {
                *slot = element;
                set = true;
            }
        }
    }

    let Some(alias) = ctx.alias(namespace) else {
        return set;
    };
    if alias.max_index >= N {
        tracing::warn!(
            namespace,
            max_index = alias.max_index,
            capacity = N,
            "form array index beyond array capacity, ignoring overflow values"
        );
    }
    for entry in &alias.entries {
        let index = match entry.index {
            Some(index) if index >= N => continue,
            Some(index) => index,
            None => {
                ctx.set_error(namespace, Error::invalid_index(&entry.key, "array"));
                continue;
            }
        };
        let mut element = T::form_default();
        let element_ns = format!("{}{}", namespace, entry.search_token);
        if decode_value(&mut element, ctx, &element_ns, 0, false) {
            array[index] = element;
            set = true;
        }
    }
    set
}
