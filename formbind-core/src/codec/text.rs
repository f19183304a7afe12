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

//! Types that carry their own textual form.
//!
//! A type implementing [`TextCodec`] binds from and renders to a single
//! value through it, whatever its internal structure. Use
//! [`impl_form_text!`](crate::impl_form_text) to hook such a type into the
//! codec, [`impl_form_text_from_str!`](crate::impl_form_text_from_str) when
//! `FromStr` and `Display` already provide the text form, and
//! [`impl_form_custom!`](crate::impl_form_custom) for types that should only
//! be handled by registered conversion functions.

use std::any::type_name;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::encoder::TypedValue;
use crate::error::{BoxError, Error};
use crate::resolver::context::{DecodeContext, EncodeContext};
use crate::types::Position;

pub trait TextCodec: Sized {
    fn decode_text(text: &str) -> Result<Self, BoxError>;

    fn encode_text(&self) -> Result<String, BoxError>;
}

/// Decodes the `idx`-th value at `namespace` through [`TextCodec`].
pub fn decode_text<T: TextCodec>(value: &mut T, ctx: &mut DecodeContext<'_>, namespace: &str, idx: usize) -> bool {
    let result = match ctx.value_at(namespace, idx) {
        Some(raw) => T::decode_text(raw),
        None => return false,
    };
    match result {
        Ok(v) => {
            *value = v;
            true
        }
        Err(e) => {
            ctx.set_error(namespace, Error::conversion(e));
            false
        }
    }
}

/// Encodes through [`TextCodec`]. Nothing is written for the top level value.
pub fn encode_text<T: TextCodec + 'static>(
    value: &T,
    ctx: &mut EncodeContext<'_>,
    namespace: &str,
    position: Position,
) {
    if namespace.is_empty() {
        return;
    }
    match value.encode_text() {
        Ok(text) => ctx.set_val(position.apply(namespace), text, |text| TypedValue::Opaque {
            type_name: type_name::<T>(),
            text: text.to_string(),
        }),
        Err(e) => ctx.set_error(namespace, Error::conversion(e)),
    }
}

/// Typed form of a [`TextCodec`] value, `None` when it does not render.
pub fn typed_text<T: TextCodec + 'static>(value: &T) -> Option<TypedValue> {
    value.encode_text().ok().map(|text| TypedValue::Opaque {
        type_name: type_name::<T>(),
        text,
    })
}

/// Implements `FormDefault` and `FormValue` for a [`TextCodec`] type.
///
/// The type must implement `PartialEq`; the zero value is `Default::default()`
/// unless given as the second argument.
#[macro_export]
macro_rules! impl_form_text {
    ($ty:ty) => {
        $crate::impl_form_text!($ty, <$ty as ::std::default::Default>::default());
    };
    ($ty:ty, $default:expr) => {
        impl $crate::codec::FormDefault for $ty {
            fn form_default() -> Self {
                $default
            }
        }

        impl $crate::codec::FormValue for $ty {
            fn form_kind() -> $crate::types::FieldKind {
                $crate::types::FieldKind::Opaque
            }

            fn form_decode(
                &mut self,
                ctx: &mut $crate::resolver::context::DecodeContext<'_>,
                namespace: &str,
                idx: usize,
                _in_option: bool,
            ) -> bool {
                $crate::codec::text::decode_text(self, ctx, namespace, idx)
            }

            fn form_encode(
                &self,
                ctx: &mut $crate::resolver::context::EncodeContext<'_>,
                namespace: &str,
                position: $crate::types::Position,
            ) {
                $crate::codec::text::encode_text(self, ctx, namespace, position)
            }

            fn form_has_value(&self) -> bool {
                *self != <$ty as $crate::codec::FormDefault>::form_default()
            }

            fn form_decode_key(key: &str, _namespace: &str) -> ::std::result::Result<Self, $crate::error::Error> {
                <$ty as $crate::codec::text::TextCodec>::decode_text(key).map_err($crate::error::Error::conversion)
            }

            fn form_encode_key(&self) -> ::std::option::Option<::std::string::String> {
                <$ty as $crate::codec::text::TextCodec>::encode_text(self).ok()
            }

            fn form_typed(&self) -> ::std::option::Option<$crate::encoder::TypedValue> {
                $crate::codec::text::typed_text(self)
            }
        }
    };
}

/// Implements [`TextCodec`] through `FromStr` and `Display`, then [`impl_form_text!`].
#[macro_export]
macro_rules! impl_form_text_from_str {
    ($ty:ty) => {
        $crate::impl_form_text_from_str!($ty, <$ty as ::std::default::Default>::default());
    };
    ($ty:ty, $default:expr) => {
        impl $crate::codec::text::TextCodec for $ty {
            fn decode_text(text: &str) -> ::std::result::Result<Self, $crate::error::BoxError> {
                text.parse::<$ty>().map_err(::std::convert::Into::into)
            }

            fn encode_text(&self) -> ::std::result::Result<::std::string::String, $crate::error::BoxError> {
                ::std::result::Result::Ok(::std::string::ToString::to_string(self))
            }
        }

        $crate::impl_form_text!($ty, $default);
    };
}

/// Implements `FormDefault` and `FormValue` for a type bound only through
/// registered conversion functions.
///
/// Without a registration such a field is left untouched on decode and
/// produces no output on encode. The type must implement `Default` and
/// `PartialEq`.
#[macro_export]
macro_rules! impl_form_custom {
    ($ty:ty) => {
        impl $crate::codec::FormDefault for $ty {
            fn form_default() -> Self {
                <$ty as ::std::default::Default>::default()
            }
        }

        impl $crate::codec::FormValue for $ty {
            fn form_kind() -> $crate::types::FieldKind {
                $crate::types::FieldKind::Opaque
            }

            fn form_decode(
                &mut self,
                _ctx: &mut $crate::resolver::context::DecodeContext<'_>,
                _namespace: &str,
                _idx: usize,
                _in_option: bool,
            ) -> bool {
                false
            }

            fn form_encode(
                &self,
                _ctx: &mut $crate::resolver::context::EncodeContext<'_>,
                _namespace: &str,
                _position: $crate::types::Position,
            ) {
            }

            fn form_has_value(&self) -> bool {
                *self != <$ty as ::std::default::Default>::default()
            }
        }
    };
}

impl_form_text_from_str!(IpAddr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
impl_form_text_from_str!(Ipv4Addr, Ipv4Addr::UNSPECIFIED);
impl_form_text_from_str!(Ipv6Addr, Ipv6Addr::UNSPECIFIED);
impl_form_text_from_str!(SocketAddr, SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0));
