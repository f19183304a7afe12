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

use std::any::type_name;

use crate::codec::{decode_value, encode_value, FormDefault, FormValue};
use crate::encoder::TypedValue;
use crate::error::Error;
use crate::resolver::context::{DecodeContext, EncodeContext};
use crate::resolver::shape::{FieldMeta, RecordType};
use crate::types::{FieldKind, Position};

impl<T> FormDefault for Option<T> {
    #[inline(always)]
    fn form_default() -> Self {
        None
    }
}

impl<T: FormValue> FormValue for Option<T> {
    #[inline(always)]
    fn form_kind() -> FieldKind {
        FieldKind::Optional
    }

    fn form_decode(
        &mut self,
        ctx: &mut DecodeContext<'_>,
        namespace: &str,
        idx: usize,
        _in_option: bool,
    ) -> bool {
        let mut inner = T::form_default();
        if decode_value(&mut inner, ctx, namespace, idx, true) {
            *self = Some(inner);
            return true;
        }
        false
    }

    fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, position: Position) {
        if let Some(inner) = self {
            encode_value(inner, ctx, namespace, position, &FieldMeta::element());
        }
    }

    #[inline(always)]
    fn form_has_value(&self) -> bool {
        self.is_some()
    }

    fn form_typed(&self) -> Option<TypedValue> {
        self.as_ref().and_then(T::form_typed)
    }

    fn form_record() -> Option<RecordType> {
        T::form_record()
    }

    fn form_encode_root(&self, ctx: &mut EncodeContext<'_>) {
        match self {
            Some(inner) => inner.form_encode_root(ctx),
            None => ctx.set_error(
                "",
                Error::invalid_encode(format!("cannot encode an empty {}", type_name::<Self>())),
            ),
        }
    }
}

impl<T: FormDefault> FormDefault for Box<T> {
    #[inline(always)]
    fn form_default() -> Self {
        Box::new(T::form_default())
    }
}

/// Boxes are transparent: they bind exactly like the value they hold.
impl<T: FormValue> FormValue for Box<T> {
    #[inline(always)]
    fn form_kind() -> FieldKind {
        T::form_kind()
    }

    fn form_decode(
        &mut self,
        ctx: &mut DecodeContext<'_>,
        namespace: &str,
        idx: usize,
        in_option: bool,
    ) -> bool {
        decode_value(&mut **self, ctx, namespace, idx, in_option)
    }

    fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, position: Position) {
        encode_value(&**self, ctx, namespace, position, &FieldMeta::element());
    }

    #[inline(always)]
    fn form_has_value(&self) -> bool {
        (**self).form_has_value()
    }

    fn form_decode_key(key: &str, namespace: &str) -> Result<Self, Error> {
        T::form_decode_key(key, namespace).map(Box::new)
    }

    fn form_encode_key(&self) -> Option<String> {
        (**self).form_encode_key()
    }

    fn form_typed(&self) -> Option<TypedValue> {
        (**self).form_typed()
    }

    fn form_record() -> Option<RecordType> {
        T::form_record()
    }

    fn form_decode_root(&mut self, ctx: &mut DecodeContext<'_>) -> bool {
        (**self).form_decode_root(ctx)
    }

    fn form_encode_root(&self, ctx: &mut EncodeContext<'_>) {
        (**self).form_encode_root(ctx)
    }
}
