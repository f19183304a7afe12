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

impl FormDefault for String {
    #[inline(always)]
    fn form_default() -> Self {
        String::new()
    }
}

impl FormValue for String {
    #[inline(always)]
    fn form_kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::String)
    }

    fn form_decode(
        &mut self,
        ctx: &mut DecodeContext<'_>,
        namespace: &str,
        idx: usize,
        _in_option: bool,
    ) -> bool {
        match ctx.value_at(namespace, idx) {
            Some(raw) => {
                raw.clone_into(self);
                true
            }
            None => false,
        }
    }

    fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, _position: Position) {
        ctx.set_val(namespace.to_string(), self.clone(), |text| {
            TypedValue::String(text.to_string())
        });
    }

    #[inline(always)]
    fn form_has_value(&self) -> bool {
        !self.is_empty()
    }

    fn form_typed(&self) -> Option<TypedValue> {
        Some(TypedValue::String(self.clone()))
    }

    fn form_decode_key(key: &str, _namespace: &str) -> Result<Self, Error> {
        Ok(key.to_string())
    }

    fn form_encode_key(&self) -> Option<String> {
        Some(self.clone())
    }
}
