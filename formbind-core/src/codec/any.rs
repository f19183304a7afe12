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

use std::any::Any;
use std::fmt;

use crate::codec::{FormDefault, FormValue};
use crate::encoder::TypedValue;
use crate::resolver::context::{DecodeContext, EncodeContext};
use crate::types::{FieldKind, Position};

/// Untyped field slot.
///
/// Decoding stores the received text as a `String`. Encoding renders a held
/// `String`, `i64`, `u64`, `f64` or `bool`; anything else is left out.
#[derive(Default)]
pub struct Dynamic(pub Option<Box<dyn Any + Send + Sync>>);

impl Dynamic {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Dynamic(Some(Box::new(value)))
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|v| v.downcast_ref::<T>())
    }

    pub fn as_str(&self) -> Option<&str> {
        self.downcast_ref::<String>().map(String::as_str)
    }

    fn render(&self) -> Option<(String, TypedValue)> {
        let value = self.0.as_deref()?;
        if let Some(s) = value.downcast_ref::<String>() {
            return Some((s.clone(), TypedValue::String(s.clone())));
        }
        if let Some(v) = value.downcast_ref::<i64>() {
            return Some((v.to_string(), TypedValue::Int(*v)));
        }
        if let Some(v) = value.downcast_ref::<u64>() {
            return Some((v.to_string(), TypedValue::Uint(*v)));
        }
        if let Some(v) = value.downcast_ref::<f64>() {
            return Some((v.to_string(), TypedValue::Float(*v)));
        }
        if let Some(v) = value.downcast_ref::<bool>() {
            return Some((v.to_string(), TypedValue::Bool(*v)));
        }
        None
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.0, self.as_str()) {
            (None, _) => f.write_str("Dynamic(None)"),
            (Some(_), Some(s)) => write!(f, "Dynamic({:?})", s),
            (Some(_), None) => f.write_str("Dynamic(..)"),
        }
    }
}

impl FormDefault for Dynamic {
    fn form_default() -> Self {
        Dynamic(None)
    }
}

impl FormValue for Dynamic {
    #[inline(always)]
    fn form_kind() -> FieldKind {
        FieldKind::Dynamic
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
                self.0 = Some(Box::new(raw.to_string()));
                true
            }
            None => false,
        }
    }

    fn form_encode(&self, ctx: &mut EncodeContext<'_>, namespace: &str, _position: Position) {
        if let Some((text, typed)) = self.render() {
            ctx.set_val(namespace.to_string(), text, |_| typed);
        }
    }

    fn form_has_value(&self) -> bool {
        self.0.is_some()
    }

    fn form_typed(&self) -> Option<TypedValue> {
        self.render().map(|(_, typed)| typed)
    }
}
