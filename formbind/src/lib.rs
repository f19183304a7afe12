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

//! # Formbind
//!
//! Formbind binds flat form data, as carried by query strings and
//! `application/x-www-form-urlencoded` bodies, to nested typed Rust values and
//! back. Nesting is expressed with bracket paths and dotted field names:
//!
//! ```text
//! name=Bob
//! addresses[0].city=Oslo
//! attrs[color]=red
//! tags=a&tags=b
//! ```
//!
//! ## Key Features
//!
//! - **Derive-based**: `#[derive(FormObject)]` describes a struct once; shapes
//!   are resolved lazily and cached per type
//! - **Partial success**: decoding binds every field it can and reports
//!   failures per namespace instead of stopping at the first one
//! - **Collections**: lists by repetition or explicit index, fixed arrays,
//!   maps keyed by any scalar, optionals and nested records
//! - **Extensible**: conversion functions per type, text codecs and
//!   configurable naming (tag key, prefix and suffix, explicit mode)
//!
//! ## Decoding and encoding
//!
//! ```rust
//! use formbind::{values_from_pairs, Decoder, Encoder, FormObject};
//!
//! #[derive(FormObject, Debug, Default, PartialEq)]
//! pub struct Address {
//!     pub city: String,
//! }
//!
//! #[derive(FormObject, Debug, Default, PartialEq)]
//! pub struct User {
//!     pub name: String,
//!     #[tag(form = "age,omitempty")]
//!     pub age: u8,
//!     pub addresses: Vec<Address>,
//! }
//!
//! let values = values_from_pairs([("name", "Bob"), ("addresses[0].city", "Oslo")]);
//! let mut user = User::default();
//! Decoder::default().decode(&mut user, &values).unwrap();
//! assert_eq!(user.addresses[0].city, "Oslo");
//!
//! let encoded = Encoder::default().encode(&user).unwrap();
//! assert_eq!(encoded, values);
//! ```
//!
//! ## Errors
//!
//! Both directions collect [`Error`]s keyed by namespace in an
//! [`ErrorSet`]:
//!
//! ```rust
//! use formbind::{values_from_pairs, Decoder, Error, FormObject};
//!
//! #[derive(FormObject, Default)]
//! pub struct Person {
//!     pub name: String,
//!     pub age: u8,
//! }
//!
//! let mut person = Person::default();
//! let errors = Decoder::default()
//!     .decode(&mut person, &values_from_pairs([("name", "Bob"), ("age", "abc")]))
//!     .unwrap_err();
//! assert_eq!(person.name, "Bob");
//! assert!(matches!(errors.get("age"), Some(Error::TypeMismatch { .. })));
//! ```

pub use formbind_core::{
    codec::null, codec::text::TextCodec, config::Config, config::Mode, decoder::DecodeOptions,
    decoder::DecodeOutput, decoder::Decoder, encoder::EncodeOptions, encoder::EncodeOutput,
    encoder::Encoder, encoder::TypedValue,
    error::DecodeErrors, error::EncodeErrors, error::Error, error::ErrorSet, impl_form_custom,
    impl_form_text, impl_form_text_from_str, values::parse_query, values::to_query,
    values::values_from_pairs, values::Values, Dynamic, FieldDecl,
};
pub use formbind_derive::FormObject;
