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

use crate::codec::{FormDefault, FormValue};
use crate::encoder::TypedValue;
use crate::error::Error;
use crate::resolver::context::{DecodeContext, EncodeContext};
use crate::types::{FieldKind, Position, ScalarKind};

// Base-10 text in the declared width; empty text assigns nothing and
// overflow is a type mismatch.
macro_rules! impl_num_form_value {
    ($ty:ty, $scalar:expr, $typed:ident, $cast:ty, $zero:expr) => {
        impl FormDefault for $ty {
            #[inline(always)]
            fn form_default() -> Self {
                $zero
            }
        }

        impl FormValue for $ty {
            #[inline(always)]
            fn form_kind() -> FieldKind {
                FieldKind::Scalar($scalar)
            }

            fn form_decode(
                &mut self,
                ctx: &mut DecodeContext<'_>,
                namespace: &str,
                idx: usize,
                _in_option: bool,
            ) -> bool {
                let raw = match ctx.value_at(namespace, idx) {
                    Some(raw) if !raw.is_empty() => raw,
                    _ => return false,
                };
                match raw.parse::<$ty>() {
                    Ok(v) => {
                        *self = v;
                        true
                    }
                    Err(_) => {
                        let err =
                            Error::type_mismatch($scalar.describe(), raw, stringify!($ty), namespace);
                        ctx.set_error(namespace, err);
                        false
                    }
                }
            }

            fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, _position: Position) {
                let v = *self;
                ctx.set_val(namespace.to_string(), v.to_string(), |_| TypedValue::$typed(v as $cast));
            }

            #[inline(always)]
            fn form_has_value(&self) -> bool {
                *self != $zero
            }

            fn form_typed(&self) -> Option<TypedValue> {
                Some(TypedValue::$typed(*self as $cast))
            }

            fn form_decode_key(key: &str, namespace: &str) -> Result<Self, Error> {
                key.parse::<$ty>()
                    .map_err(|_| Error::type_mismatch($scalar.describe(), key, stringify!($ty), namespace))
            }

            fn form_encode_key(&self) -> Option<String> {
                Some(self.to_string())
            }
        }
    };
}

impl_num_form_value!(i8, ScalarKind::Int, Int, i64, 0);
impl_num_form_value!(i16, ScalarKind::Int, Int, i64, 0);
impl_num_form_value!(i32, ScalarKind::Int, Int, i64, 0);
impl_num_form_value!(i64, ScalarKind::Int, Int, i64, 0);
impl_num_form_value!(isize, ScalarKind::Int, Int, i64, 0);
impl_num_form_value!(u8, ScalarKind::Uint, Uint, u64, 0);
impl_num_form_value!(u16, ScalarKind::Uint, Uint, u64, 0);
impl_num_form_value!(u32, ScalarKind::Uint, Uint, u64, 0);
impl_num_form_value!(u64, ScalarKind::Uint, Uint, u64, 0);
impl_num_form_value!(usize, ScalarKind::Uint, Uint, u64, 0);
impl_num_form_value!(f32, ScalarKind::Float, Float, f64, 0.0);
impl_num_form_value!(f64, ScalarKind::Float, Float, f64, 0.0);
