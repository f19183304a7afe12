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

//! # Formbind Core
//!
//! The core of the formbind form codec. It moves data between flat form
//! values, a map from keys to ordered lists of strings, and nested typed
//! values addressed with bracket paths.
//!
//! ## Architecture
//!
//! - **`values`**: the flat [`Values`](values::Values) map and urlencoded text helpers
//! - **`resolver`**: record shapes and their cache, the bracket namespace
//!   parser, custom conversion registries and per-call contexts
//! - **`codec`**: one [`FormValue`](codec::FormValue) implementation per kind of value
//! - **`decoder`** / **`encoder`**: the public entry points and their options
//! - **`config`**: naming and limit settings shared by both directions
//! - **`error`**: the error type and the per-namespace error set
//!
//! ## Wire grammar
//!
//! A key is either a plain name (`name`), an indexed element (`tags[2]`), a map
//! entry (`attrs[color]`) or a chain of those (`items[0][qty]`). Nested record
//! fields are joined with a configurable prefix and suffix, `.` by default:
//!
//! ```text
//! name=Bob
//! tags=a&tags=b
//! addresses[0].city=Oslo
//! attrs[color]=red
//! ```
//!
//! ## Usage
//!
//! This crate is normally used through the `formbind` crate, which adds the
//! `FormObject` derive macro.
//!
//! ```rust
//! use formbind_core::{values::values_from_pairs, Decoder, Encoder};
//!
//! let mut tags: Vec<String> = Vec::new();
//! Decoder::default()
//!     .decode(&mut tags, &values_from_pairs([("", "a"), ("", "b")]))
//!     .unwrap();
//! assert_eq!(tags, vec!["a", "b"]);
//!
//! let values = Encoder::default().encode(&tags).unwrap();
//! assert_eq!(values[""], vec!["a", "b"]);
//! ```

pub mod codec;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod resolver;
pub mod types;
pub mod values;

pub use codec::any::Dynamic;
pub use codec::text::TextCodec;
pub use codec::{FormDefault, FormRecord, FormValue};
pub use config::{Config, Mode};
pub use decoder::{DecodeOptions, DecodeOutput, Decoder};
pub use encoder::{EncodeOptions, EncodeOutput, Encoder, TypedValue};
pub use error::{BoxError, DecodeErrors, EncodeErrors, Error, ErrorSet};
pub use resolver::shape::FieldDecl;
pub use types::FieldKind;
pub use values::Values;
