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

//! # Formbind Derive Macros
//!
//! This crate provides the procedural macro of the formbind form codec.
//!
//! ## `#[derive(FormObject)]`
//!
//! Generates the field table and the `FormDefault`, `FormRecord` and
//! `FormValue` implementations for a struct with named fields, so it can be
//! decoded from and encoded to bracket-path form values.
//!
//! **Field attributes:**
//! - `#[tag(form = "name,omitempty")]`: wire name and options. Any key can be
//!   declared; the decoder and encoder read the one named by their tag name.
//! - `#[tag(collection_format = "csv")]`: bind a list field through a single
//!   joined value (`csv`, `tsv`, `ssv` or `pipes`).
//! - `#[form(embed)]`: flatten the fields of a nested record into the parent.
//!
//! Private fields are ignored unless embedded. `Option<Box<dyn Trait>>` fields
//! are declared but never bound.
//!
//! **Example:**
//! ```rust, ignore
//! use formbind::FormObject;
//!
//! #[derive(FormObject, Debug, Default, PartialEq)]
//! pub struct Base {
//!     pub id: u64,
//! }
//!
//! #[derive(FormObject, Debug, Default, PartialEq)]
//! pub struct Order {
//!     #[form(embed)]
//!     pub base: Base,
//!     #[tag(form = "customer")]
//!     pub customer_name: String,
//!     #[tag(form = "tags,omitempty", collection_format = "csv")]
//!     pub tags: Vec<String>,
//!     pub lines: Vec<Line>,
//! }
//!
//! #[derive(FormObject, Debug, Default, PartialEq)]
//! pub struct Line {
//!     pub sku: String,
//!     pub qty: u32,
//! }
//! ```
//!
//! Generated code refers to `formbind_core`, which must be a dependency of
//! the deriving crate.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod object;
mod util;

/// Derive macro for form binding.
///
/// # Example
///
/// ```rust, ignore
/// use formbind::FormObject;
///
/// #[derive(FormObject, Default)]
/// pub struct Search {
///     pub q: String,
///     #[tag(form = "page,omitempty")]
///     pub page: u32,
/// }
/// ```
#[proc_macro_derive(FormObject, attributes(form, tag))]
pub fn proc_macro_derive_form_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    object::derive_form_object(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
