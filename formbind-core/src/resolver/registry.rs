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

//! User registered conversion functions, keyed by the exact Rust type they produce or consume.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::BoxError;

pub type DecodeFn = Arc<dyn Fn(&str) -> Result<Box<dyn Any + Send>, BoxError> + Send + Sync>;
pub type EncodeFn = Arc<dyn Fn(&dyn Any) -> Result<String, BoxError> + Send + Sync>;

/// Text to value conversions consulted before built-in decoding.
#[derive(Clone, Default)]
pub struct CustomDecoders {
    funcs: HashMap<TypeId, DecodeFn>,
}

impl CustomDecoders {
    /// Registers `f` for values of type `T`, replacing an earlier registration.
    pub fn register<T, F, E>(&mut self, f: F)
    where
        T: Send + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let func: DecodeFn = Arc::new(move |text: &str| match f(text) {
            Ok(value) => Ok(Box::new(value) as Box<dyn Any + Send>),
            Err(e) => Err(e.into()),
        });
        self.funcs.insert(TypeId::of::<T>(), func);
    }

    #[inline(always)]
    pub fn get(&self, type_id: TypeId) -> Option<&DecodeFn> {
        if self.funcs.is_empty() {
            return None;
        }
        self.funcs.get(&type_id)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.funcs.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

/// Value to text conversions consulted before built-in encoding.
#[derive(Clone, Default)]
pub struct CustomEncoders {
    funcs: HashMap<TypeId, EncodeFn>,
}

impl CustomEncoders {
    /// Registers `f` for values of type `T`, replacing an earlier registration.
    pub fn register<T, F, E>(&mut self, f: F)
    where
        T: 'static,
        F: Fn(&T) -> Result<String, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let func: EncodeFn = Arc::new(move |value: &dyn Any| match value.downcast_ref::<T>() {
            Some(value) => f(value).map_err(Into::into),
            None => Err(format!(
                "value of unexpected type received, want {}",
                std::any::type_name::<T>()
            )
            .into()),
        });
        self.funcs.insert(TypeId::of::<T>(), func);
    }

    #[inline(always)]
    pub fn get(&self, type_id: TypeId) -> Option<&EncodeFn> {
        if self.funcs.is_empty() {
            return None;
        }
        self.funcs.get(&type_id)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.funcs.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

impl std::fmt::Debug for CustomDecoders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomDecoders").field("len", &self.len()).finish()
    }
}

impl std::fmt::Debug for CustomEncoders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomEncoders").field("len", &self.len()).finish()
    }
}
