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

/// Field name that excludes a field from binding.
pub const SKIP_NAME: &str = "-";

/// Name option marking a field to be left out of the output when empty.
pub const OMIT_EMPTY: &str = "omitempty";

/// Tag key selecting how a list field is joined into a single value.
pub const LIST_FORMAT_TAG: &str = "collection_format";

/// Closed set of value shapes the codec dispatches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Untyped slot holding whatever text was received.
    Dynamic,
    /// `Option<T>`.
    Optional,
    Scalar(ScalarKind),
    /// Growable sequence, `Vec<T>`.
    List,
    /// Fixed length sequence, `[T; N]`.
    FixedList,
    /// Keyed collection.
    Map,
    /// Struct with declared fields.
    Record,
    /// RFC 3339 date-time.
    Timestamp,
    /// Handled only by a text codec or a registered conversion function.
    Opaque,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int,
    Uint,
    Float,
    Bool,
}

impl FieldKind {
    #[inline(always)]
    pub fn is_scalar(self) -> bool {
        matches!(self, FieldKind::Scalar(_))
    }

    /// Whether a value of this kind, written as a list element, repeats the
    /// list key instead of adding a `[i]` segment.
    #[inline(always)]
    pub fn repeats_key(self) -> bool {
        matches!(self, FieldKind::Scalar(_) | FieldKind::Dynamic)
    }
}

/// Where a value sits relative to the namespace it is encoded under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// A record field or the top level value.
    Field,
    /// Element `i` of a list field; the `[i]` segment is not written yet.
    Element(usize),
    /// Inside a container whose index segments are already written.
    Nested,
}

impl Position {
    /// Namespace of a value at this position: `ns[i]` for elements, `ns` otherwise.
    pub fn apply(self, namespace: &str) -> String {
        match self {
            Position::Element(i) => index_namespace(namespace, i),
            _ => namespace.to_string(),
        }
    }

    /// Position handed to the fields of a record at this position.
    #[inline(always)]
    pub fn for_fields(self) -> Position {
        match self {
            Position::Field => Position::Field,
            _ => Position::Nested,
        }
    }
}

/// Appends a `[i]` segment.
pub fn index_namespace(namespace: &str, index: usize) -> String {
    let mut ns = String::with_capacity(namespace.len() + 8);
    ns.push_str(namespace);
    ns.push('[');
    ns.push_str(&index.to_string());
    ns.push(']');
    ns
}

/// Appends a `[key]` segment.
pub fn key_namespace(namespace: &str, key: &str) -> String {
    let mut ns = String::with_capacity(namespace.len() + key.len() + 2);
    ns.push_str(namespace);
    ns.push('[');
    ns.push_str(key);
    ns.push(']');
    ns
}

/// Join separator for a `collection_format` token.
pub fn list_separator(format: &str) -> Option<u8> {
    match format {
        "csv" => Some(b','),
        "tsv" => Some(b'\t'),
        "ssv" => Some(b' '),
        "pipes" => Some(b'|'),
        _ => None,
    }
}

impl ScalarKind {
    /// Family name used in type-mismatch messages.
    pub const fn describe(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int => "integer",
            ScalarKind::Uint => "unsigned integer",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "boolean",
        }
    }
}
