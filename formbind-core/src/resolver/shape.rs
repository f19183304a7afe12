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

//! Per-type field metadata and the process-wide shape cache.
//!
//! A record type describes its fields once through a [`FieldDecl`] table,
//! normally generated by `#[derive(FormObject)]`. [`ShapeCache`] turns that
//! table into a [`RecordShape`] under the active naming configuration and
//! memoizes it by [`TypeId`]. Readers load an immutable snapshot without
//! locking; a miss serializes on the writer lock, re-checks, derives the
//! shape and publishes a new snapshot.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::codec::FormRecord;
use crate::config::{Config, Mode, TagNameFn};
use crate::types::{list_separator, FieldKind, LIST_FORMAT_TAG, OMIT_EMPTY, SKIP_NAME};

/// Identity and field table of a record type.
#[derive(Clone, Copy, Debug)]
pub struct RecordType {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub fields: fn() -> Vec<FieldDecl>,
}

impl RecordType {
    pub fn of<T: FormRecord>() -> Self {
        RecordType {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            fields: T::form_fields,
        }
    }
}

/// Static description of one declared field.
#[derive(Clone, Debug)]
pub struct FieldDecl {
    /// Declaration position, dense from zero.
    pub index: usize,
    pub ident: &'static str,
    /// Raw `key = "value"` tags attached to the field.
    pub tags: &'static [(&'static str, &'static str)],
    pub is_public: bool,
    /// Flattened into the parent record (`#[form(embed)]`).
    pub is_embedded: bool,
    /// `Option<Box<dyn Trait>>`, which cannot be built from text.
    pub is_trait_object: bool,
    pub kind: FieldKind,
    /// Nested record type, seen through `Option` and `Box`.
    pub record: fn() -> Option<RecordType>,
}

impl FieldDecl {
    /// Value of the tag named `key`, if present.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// Field table entry for fields that hold no record.
pub fn no_record() -> Option<RecordType> {
    None
}

/// Resolved binding metadata of a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldMeta {
    pub index: usize,
    /// Wire name.
    pub name: String,
    pub is_embedded: bool,
    pub is_omit_empty: bool,
    pub is_exported: bool,
    /// Byte joining a list field into a single value.
    pub list_separator: Option<u8>,
    pub can_assign: bool,
    /// Embedded field whose record carries bindable content of its own.
    pub has_scalar_content: bool,
}

impl FieldMeta {
    /// Metadata for values that are not record fields (list elements, map values, top level).
    pub const fn element() -> Self {
        FieldMeta {
            index: 0,
            name: String::new(),
            is_embedded: false,
            is_omit_empty: false,
            is_exported: true,
            list_separator: None,
            can_assign: true,
            has_scalar_content: false,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecordShape {
    pub has_scalar_content: bool,
    pub fields: Vec<FieldMeta>,
}

type ShapeMap = HashMap<TypeId, Arc<RecordShape>>;

/// Options that change how field names are resolved.
#[derive(Clone)]
struct NamingOptions {
    tag_name: String,
    tag_name_fn: Option<TagNameFn>,
    mode: Mode,
}

pub struct ShapeCache {
    shapes: ArcSwap<ShapeMap>,
    lock: Mutex<()>,
    naming: NamingOptions,
}

impl ShapeCache {
    pub fn new(config: &Config) -> Self {
        ShapeCache {
            shapes: ArcSwap::from_pointee(ShapeMap::new()),
            lock: Mutex::new(()),
            naming: NamingOptions {
                tag_name: config.tag_name.clone(),
                tag_name_fn: config.tag_name_fn.clone(),
                mode: config.mode,
            },
        }
    }

    /// Cached shape, without deriving it.
    #[inline(always)]
    pub fn get(&self, type_id: TypeId) -> Option<Arc<RecordShape>> {
        self.shapes.load().get(&type_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.shapes.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.load().is_empty()
    }

    #[inline(always)]
    pub fn shape_of<T: FormRecord>(&self) -> Arc<RecordShape> {
        self.get_or_derive(RecordType::of::<T>())
    }

    /// Cached shape of `record`, deriving and publishing it on a miss.
    ///
    /// Shapes of embedded records found along the way are published in the
    /// same snapshot.
    ///
    /// # Panics
    ///
    /// When the field table is not numbered `0..n` in declaration order.
    pub fn get_or_derive(&self, record: RecordType) -> Arc<RecordShape> {
        if let Some(shape) = self.get(record.type_id) {
            return shape;
        }
        let _guard = self.lock.lock();
        if let Some(shape) = self.get(record.type_id) {
            return shape;
        }
        let mut staged = ShapeMap::new();
        let mut in_progress = HashSet::new();
        let shape = self.derive(record, &mut staged, &mut in_progress);

        let current = self.shapes.load();
        let mut next = ShapeMap::with_capacity(current.len() + staged.len());
        next.extend(current.iter().map(|(k, v)| (*k, v.clone())));
        next.extend(staged);
        self.shapes.store(Arc::new(next));
        shape
    }

    fn derive(
        &self,
        record: RecordType,
        staged: &mut ShapeMap,
        in_progress: &mut HashSet<TypeId>,
    ) -> Arc<RecordShape> {
        if let Some(shape) = self
            .get(record.type_id)
            .or_else(|| staged.get(&record.type_id).cloned())
        {
            return shape;
        }
        in_progress.insert(record.type_id);

        let decls = (record.fields)();
        let mut fields = Vec::with_capacity(decls.len());
        let mut has_scalar_content = false;
        for (position, decl) in decls.iter().enumerate() {
            if decl.index != position {
                panic!(
                    "field table of {} is malformed: field `{}` declared at {} has index {}",
                    record.type_name, decl.ident, position, decl.index
                );
            }
            let Some(mut field) = self.resolve_field(decl) else {
                continue;
            };
            if field.is_embedded {
                field.has_scalar_content = match (decl.record)() {
                    Some(nested) if in_progress.contains(&nested.type_id) => false,
                    Some(nested) => self.derive(nested, staged, in_progress).has_scalar_content,
                    None => decl.kind == FieldKind::Dynamic,
                };
            }
            if (!field.name.is_empty() && field.is_exported && !field.is_embedded)
                || field.has_scalar_content
            {
                has_scalar_content = true;
            }
            fields.push(field);
        }

        in_progress.remove(&record.type_id);
        tracing::debug!(
            type_name = record.type_name,
            fields = fields.len(),
            has_scalar_content,
            "derived record shape"
        );
        let shape = Arc::new(RecordShape {
            has_scalar_content,
            fields,
        });
        staged.insert(record.type_id, shape.clone());
        shape
    }

    /// Binding metadata of a single field, `None` when the field does not bind.
    fn resolve_field(&self, decl: &FieldDecl) -> Option<FieldMeta> {
        if !decl.is_public && !decl.is_embedded {
            return None;
        }
        let raw = match &self.naming.tag_name_fn {
            Some(f) => f(decl),
            None => decl.tag(&self.naming.tag_name).unwrap_or_default().to_string(),
        };
        if raw == SKIP_NAME {
            return None;
        }
        if self.naming.mode == Mode::Explicit && raw.is_empty() && !decl.is_embedded {
            return None;
        }

        let (mut name, is_omit_empty) = match raw.rfind(',') {
            Some(pos) => (raw[..pos].to_string(), &raw[pos + 1..] == OMIT_EMPTY),
            None => (raw, false),
        };
        if name.is_empty() {
            name = decl.ident.to_string();
        }

        Some(FieldMeta {
            index: decl.index,
            name,
            is_embedded: decl.is_embedded,
            is_omit_empty,
            is_exported: decl.is_public,
            list_separator: decl.tag(LIST_FORMAT_TAG).and_then(list_separator),
            can_assign: !decl.is_trait_object
                && !(decl.is_embedded && !decl.is_public && decl.kind == FieldKind::Optional),
            has_scalar_content: false,
        })
    }
}

impl std::fmt::Debug for ShapeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeCache")
            .field("shapes", &self.len())
            .field("tag_name", &self.naming.tag_name)
            .field("mode", &self.naming.mode)
            .finish()
    }
}
