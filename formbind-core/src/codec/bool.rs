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

/// Parses the boolean spellings accepted on the wire. Empty text is `false`.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" | "on" | "yes" | "ok" => Some(true),
        "" | "0" | "f" | "F" | "false" | "FALSE" | "False" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl FormDefault for bool {
    #[inline(always)]
    fn form_default() -> Self {
        false
    }
}

impl FormValue for bool {
    #[inline(always)]
    fn form_kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Bool)
    }

    fn form_decode(
        &mut self,
        ctx: &mut DecodeContext<'_>,
        namespace: &str,
        idx: usize,
        in_option: bool,
    ) -> bool {
        let raw = match ctx.value_at(namespace, idx) {
            // an empty value leaves an optional bool unset instead of false
            Some("") if in_option => return false,
            Some(raw) => raw,
            None => return false,
        };
        match parse_bool(raw) {
            Some(v) => {
                *self = v;
                true
            }
            None => {
                let err = Error::type_mismatch(ScalarKind::Bool.describe(), raw, "bool", namespace);
                ctx.set_error(namespace, err);
                false
            }
        }
    }

    fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, _position: Position) {
        let v = *self;
        ctx.set_val(namespace.to_string(), v.to_string(), |_| TypedValue::Bool(v));
    }

    #[inline(always)]
    fn form_has_value(&self) -> bool {
        *self
    }

    fn form_typed(&self) -> Option<TypedValue> {
        Some(TypedValue::Bool(*self))
    }

    fn form_decode_key(key: &str, namespace: &str) -> Result<Self, Error> {
        parse_bool(key)
            .ok_or_else(|| Error::type_mismatch(ScalarKind::Bool.describe(), key, "bool", namespace))
    }

    fn form_encode_key(&self) -> Option<String> {
        Some(self.to_string())
    }
}
