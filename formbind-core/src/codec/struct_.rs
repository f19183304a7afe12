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

//! Record traversal shared by every `#[derive(FormObject)]` type.

use crate::codec::FormRecord;
use crate::resolver::context::{DecodeContext, EncodeContext};
use crate::types::{index_namespace, Position};

/// Decodes a nested record at `namespace`.
///
/// Walking stops once the namespace is longer than every received key or no
/// received key lies below it, which bounds recursion through
/// self-referential records.
pub fn decode_record<T: FormRecord>(value: &mut T, ctx: &mut DecodeContext<'_>, namespace: &str) -> bool {
    if !ctx.ensure_namespaces(namespace) {
        return false;
    }
    if namespace.len() > ctx.max_key_len() || !ctx.has_keys_under(namespace) {
        return false;
    }
    decode_fields(value, ctx, namespace)
}

/// Decodes every assignable field of `value` below `namespace`.
pub fn decode_fields<T: FormRecord>(value: &mut T, ctx: &mut DecodeContext<'_>, namespace: &str) -> bool {
    let shape = ctx.shape_of::<T>();
    let mut set = false;
    for field in &shape.fields {
        if !field.can_assign {
            continue;
        }
        // embedded fields also bind straight from the parent namespace
        if field.is_embedded && field.has_scalar_content && value.form_decode_field(field.index, ctx, namespace) {
            set = true;
        }
        let field_ns = ctx.config().join_namespace(namespace, &field.name);
        if let Some(separator) = field.list_separator {
            ctx.split_values(&field_ns, separator);
        }
        if value.form_decode_field(field.index, ctx, &field_ns) {
            set = true;
            if namespace.is_empty() && ctx.collects_typed() {
                if let Some(typed) = value.form_typed_field(field.index) {
                    ctx.set_typed(field_ns, typed);
                }
            }
        }
    }
    set
}

pub fn encode_record<T: FormRecord>(value: &T, ctx: &mut EncodeContext<'_>, namespace: &str, position: Position) {
    match position {
        Position::Element(i) => encode_fields(value, ctx, &index_namespace(namespace, i), Position::Nested),
        _ => encode_fields(value, ctx, namespace, position),
    }
}

/// Encodes every field of `value` below `namespace`.
pub fn encode_fields<T: FormRecord>(value: &T, ctx: &mut EncodeContext<'_>, namespace: &str, position: Position) {
    let shape = ctx.shape_of::<T>();
    let flatten = ctx.config().embed_anonymous;
    let position = position.for_fields();
    for field in &shape.fields {
        if field.is_embedded && flatten {
            if field.has_scalar_content {
                value.form_encode_field(field.index, ctx, namespace, position, field);
            }
            continue;
        }
        let field_ns = ctx.config().join_namespace(namespace, &field.name);
        value.form_encode_field(field.index, ctx, &field_ns, position, field);
        if let Some(separator) = field.list_separator {
            ctx.join_values(&field_ns, separator);
        }
    }
}
