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

//! Per-kind decode and encode implementations.
//!
//! Every bindable type implements [`FormValue`]. The free functions
//! [`decode_value`] and [`encode_value`] are the single entry point used for
//! every field, element and map value: they consult the registered custom
//! functions for the exact type first and fall back to the type's own
//! implementation otherwise.

use std::any::{type_name, TypeId};
use std::borrow::Cow;

use crate::encoder::TypedValue;
use crate::error::Error;
use crate::resolver::context::{DecodeContext, EncodeContext};
use crate::resolver::shape::{FieldDecl, FieldMeta, RecordType};
use crate::types::{index_namespace, FieldKind, Position};

pub mod any;
pub mod array;
pub mod bool;
pub mod datetime;
pub mod list;
pub mod map;
pub mod null;
pub mod number;
pub mod option;
pub mod string;
pub mod struct_;
pub mod text;

/// Zero value a field starts from before it is decoded.
pub trait FormDefault: Sized {
    fn form_default() -> Self;
}

/// A value that can be bound from and rendered to flat form values.
pub trait FormValue: FormDefault + 'static {
    fn form_kind() -> FieldKind;

    /// Decodes the value found at `namespace`, `idx` selecting among repeated
    /// values. Returns whether anything was assigned.
    ///
    /// `in_option` is set when the value is the payload of an `Option`.
    fn form_decode(
        &mut self,
        ctx: &mut DecodeContext<'_>,
        namespace: &str,
        idx: usize,
        in_option: bool,
    ) -> bool;

    fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, position: Position);

    /// Whether the value differs from its zero value.
    fn form_has_value(&self) -> bool;

    /// Parses a map key. Types without a key form report an unsupported-key error.
    fn form_decode_key(key: &str, namespace: &str) -> Result<Self, Error> {
        Err(Error::unsupported_key(format!(
            "unsupported map key '{}' type '{}' namespace '{}'",
            key,
            type_name::<Self>(),
            namespace
        )))
    }

    /// Renders the value as a map key, `None` when the type has no key form.
    fn form_encode_key(&self) -> Option<String> {
        None
    }

    /// The value as a single typed value, `None` for composites and unset values.
    fn form_typed(&self) -> Option<TypedValue> {
        None
    }

    /// Record type reached through this type, if any.
    fn form_record() -> Option<RecordType> {
        None
    }

    /// Decodes the value as the target of a whole decode call.
    fn form_decode_root(&mut self, ctx: &mut DecodeContext<'_>) -> bool {
        decode_value(self, ctx, "", 0, false)
    }

    /// Encodes the value as the input of a whole encode call.
    fn form_encode_root(&self, ctx: &mut EncodeContext<'_>) {
        encode_value(self, ctx, "", Position::Field, &FieldMeta::element());
    }
}

/// A struct with a declared field table, implemented by `#[derive(FormObject)]`.
pub trait FormRecord: FormValue {
    fn form_fields() -> Vec<FieldDecl>;

    /// Decodes the field declared at `index` from `namespace`.
    fn form_decode_field(&mut self, index: usize, ctx: &mut DecodeContext<'_>, namespace: &str) -> bool;

    /// Typed value of the field declared at `index`.
    fn form_typed_field(&self, index: usize) -> Option<TypedValue>;

    /// Encodes the field declared at `index` under `namespace`.
    fn form_encode_field(
        &self,
        index: usize,
        ctx: &mut EncodeContext<'_>,
        namespace: &str,
        position: Position,
        field: &FieldMeta,
    );
}

/// Decodes `value` from `namespace`, preferring a registered conversion function.
pub fn decode_value<T: FormValue>(
    value: &mut T,
    ctx: &mut DecodeContext<'_>,
    namespace: &str,
    idx: usize,
    in_option: bool,
) -> bool {
    if let Some(func) = ctx.custom_decoder(TypeId::of::<T>()) {
        if ctx.has_values(namespace) {
            let result = match ctx.value_at(namespace, idx) {
                Some(raw) => func(raw),
                None => return false,
            };
            let converted = match result {
                Ok(boxed) => boxed.downcast::<T>().map_err(|_| {
                    Error::conversion(format!(
                        "conversion function for {} returned a value of another type",
                        type_name::<T>()
                    ))
                }),
                Err(e) => Err(Error::conversion(e)),
            };
            return match converted {
                Ok(v) => {
                    *value = *v;
                    true
                }
                Err(err) => {
                    ctx.set_error(namespace, err);
                    false
                }
            };
        }
    }
    value.form_decode(ctx, namespace, idx, in_option)
}

/// Parses a map key, preferring a registered conversion function.
pub fn decode_key<K: FormValue>(ctx: &DecodeContext<'_>, key: &str, namespace: &str) -> Result<K, Error> {
    match ctx.custom_decoder(TypeId::of::<K>()) {
        Some(func) => {
            let boxed = func(key).map_err(Error::conversion)?;
            boxed.downcast::<K>().map(|k| *k).map_err(|_| {
                Error::conversion(format!(
                    "conversion function for {} returned a value of another type",
                    type_name::<K>()
                ))
            })
        }
        None => K::form_decode_key(key, namespace),
    }
}

/// Encodes `value` under `namespace`, preferring a registered conversion function.
///
/// Optional list elements get their `[i]` segment before anything else so a
/// `None` element leaves a gap rather than shifting its successors.
pub fn encode_value<T: FormValue>(
    value: &T,
    ctx: &mut EncodeContext<'_>,
    namespace: &str,
    position: Position,
    field: &FieldMeta,
) {
    let (namespace, position) = match position {
        Position::Element(i) if T::form_kind() == FieldKind::Optional => {
            (Cow::Owned(index_namespace(namespace, i)), Position::Nested)
        }
        _ => (Cow::Borrowed(namespace), position),
    };

    if field.is_omit_empty && !value.form_has_value() {
        return;
    }

    if let Some(func) = ctx.custom_encoder(TypeId::of::<T>()) {
        match func(value) {
            Ok(text) => ctx.set_val(position.apply(&namespace), text, |text| TypedValue::Opaque {
                type_name: type_name::<T>(),
                text: text.to_string(),
            }),
            Err(e) => ctx.set_error(namespace.into_owned(), Error::conversion(e)),
        }
        return;
    }

    value.form_encode(ctx, &namespace, position);
}

/// Renders a map key, preferring a registered conversion function.
///
/// Failures are recorded at `namespace` and skip only this entry.
pub fn encode_key<K: FormValue>(ctx: &mut EncodeContext<'_>, key: &K, namespace: &str) -> Option<String> {
    if let Some(func) = ctx.custom_encoder(TypeId::of::<K>()) {
        return match func(key) {
            Ok(text) => Some(text),
            Err(e) => {
                ctx.set_error(namespace, Error::conversion(e));
                None
            }
        };
    }
    let rendered = key.form_encode_key();
    if rendered.is_none() {
        ctx.set_error(
            namespace,
            Error::unsupported_key(format!(
                "unsupported map key type '{}' namespace '{}'",
                type_name::<K>(),
                namespace
            )),
        );
    }
    rendered
}
