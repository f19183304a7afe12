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

use formbind_core::codec::FormRecord;
use formbind_core::config::{Config, Mode};
use formbind_core::resolver::shape::ShapeCache;
use formbind_core::types::{FieldKind, ScalarKind};
use formbind_derive::FormObject;
use std::sync::Arc;

#[derive(FormObject, Default)]
pub struct Audit {
    pub created_by: String,
}

#[derive(FormObject, Default)]
pub struct Marker {}

#[derive(FormObject, Default)]
pub struct Document {
    #[form(embed)]
    pub audit: Audit,
    #[form(embed)]
    pub marker: Marker,
    #[tag(form = "title,omitempty", json = "heading")]
    pub title: String,
    #[tag(form = "keywords", collection_format = "ssv")]
    pub keywords: Vec<String>,
    #[tag(form = "-")]
    pub cached: String,
    draft: bool,
    #[form(embed)]
    hidden: Option<Audit>,
    pub hook: Option<Box<dyn std::any::Any + Send + Sync>>,
    pub parent: Option<Box<Document>>,
}

#[derive(FormObject, Default)]
pub struct Tree {
    #[form(embed)]
    pub inner: Option<Box<Tree>>,
    pub label: String,
}

#[test]
fn test_field_table() {
    let decls = Document::form_fields();
    assert_eq!(decls.len(), 9);
    assert!(decls.iter().enumerate().all(|(i, d)| d.index == i));
    assert_eq!(decls[2].tag("json"), Some("heading"));
    assert_eq!(decls[3].kind, FieldKind::List);
    assert_eq!(decls[2].kind, FieldKind::Scalar(ScalarKind::String));
    assert!(!decls[5].is_public);
    assert!(decls[7].is_trait_object);
    assert_eq!(decls[8].kind, FieldKind::Optional);
    assert_eq!((decls[8].record)().unwrap().type_name, std::any::type_name::<Document>());
}

#[test]
fn test_resolved_shape() {
    let cache = ShapeCache::new(&Config::default());
    let shape = cache.shape_of::<Document>();
    let names: Vec<&str> = shape.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["audit", "marker", "title", "keywords", "hidden", "hook", "parent"]);
    assert!(shape.has_scalar_content);

    let audit = &shape.fields[0];
    assert!(audit.is_embedded && audit.has_scalar_content);
    let marker = &shape.fields[1];
    assert!(marker.is_embedded && !marker.has_scalar_content);
    let title = &shape.fields[2];
    assert!(title.is_omit_empty);
    assert_eq!(shape.fields[3].list_separator, Some(b' '));
    let hidden = &shape.fields[4];
    assert!(!hidden.is_exported && !hidden.can_assign);
    assert!(!shape.fields[5].can_assign);

    // embedded record shapes are published alongside
    assert!(cache.get(std::any::TypeId::of::<Audit>()).is_some());
    assert!(Arc::ptr_eq(&shape, &cache.shape_of::<Document>()));
}

#[test]
fn test_self_embedding_is_cut() {
    let cache = ShapeCache::new(&Config::default());
    let shape = cache.shape_of::<Tree>();
    assert!(!shape.fields[0].has_scalar_content);
    assert!(shape.has_scalar_content);
}

#[test]
fn test_explicit_mode_and_other_tag() {
    let config = Config {
        mode: Mode::Explicit,
        ..Config::default()
    };
    let cache = ShapeCache::new(&config);
    let names: Vec<String> = cache
        .shape_of::<Document>()
        .fields
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, vec!["audit", "marker", "title", "keywords", "hidden"]);

    let config = Config {
        tag_name: "json".to_string(),
        ..Config::default()
    };
    let cache = ShapeCache::new(&config);
    let shape = cache.shape_of::<Document>();
    assert_eq!(shape.fields[2].name, "heading");
    assert!(!shape.fields[2].is_omit_empty);
    assert_eq!(shape.fields[3].name, "keywords");
    assert_eq!(shape.fields[4].name, "cached");
}
