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

use std::fmt;
use std::sync::Arc;

use crate::resolver::shape::FieldDecl;

/// Default tag key read for field names.
pub const DEFAULT_TAG_NAME: &str = "form";

/// Default ceiling for positional list growth while decoding.
pub const DEFAULT_MAX_ARRAY_SIZE: usize = 10000;

/// User supplied function resolving the wire name of a field.
///
/// The returned text follows the same grammar as the tag value
/// (`name[,omitempty]`, `-` to skip).
pub type TagNameFn = Arc<dyn Fn(&FieldDecl) -> String + Send + Sync>;

/// Which fields take part in binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Every public field binds, untagged ones under their identifier.
    #[default]
    Implicit,
    /// Only tagged (or embedded) fields bind.
    Explicit,
}

/// Configuration shared by a [`Decoder`](crate::decoder::Decoder) or an
/// [`Encoder`](crate::encoder::Encoder) and the contexts of its calls.
#[derive(Clone)]
pub struct Config {
    /// Tag key holding field names.
    pub tag_name: String,
    /// Overrides `tag_name` lookup when set.
    pub tag_name_fn: Option<TagNameFn>,
    pub mode: Mode,
    /// Text placed before a nested field name, `.` by default.
    pub namespace_prefix: String,
    /// Text placed after a nested field name, empty by default.
    pub namespace_suffix: String,
    /// Maximum number of elements positional decoding may allocate.
    pub max_array_size: usize,
    /// Whether embedded records are flattened into their parent on encode.
    pub embed_anonymous: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_name: DEFAULT_TAG_NAME.to_string(),
            tag_name_fn: None,
            mode: Mode::Implicit,
            namespace_prefix: ".".to_string(),
            namespace_suffix: String::new(),
            max_array_size: DEFAULT_MAX_ARRAY_SIZE,
            embed_anonymous: true,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("tag_name", &self.tag_name)
            .field("tag_name_fn", &self.tag_name_fn.as_ref().map(|_| "<fn>"))
            .field("mode", &self.mode)
            .field("namespace_prefix", &self.namespace_prefix)
            .field("namespace_suffix", &self.namespace_suffix)
            .field("max_array_size", &self.max_array_size)
            .field("embed_anonymous", &self.embed_anonymous)
            .finish()
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    #[inline(always)]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline(always)]
    pub fn max_array_size(&self) -> usize {
        self.max_array_size
    }

    #[inline(always)]
    pub fn is_embed_anonymous(&self) -> bool {
        self.embed_anonymous
    }

    /// Joins a nested field name onto its parent namespace.
    ///
    /// Root fields are bare names; deeper ones are wrapped in the configured
    /// prefix and suffix, e.g. `user.address` or `user[address]`.
    pub fn join_namespace(&self, parent: &str, name: &str) -> String {
        if parent.is_empty() {
            return name.to_string();
        }
        let mut ns = String::with_capacity(
            parent.len() + self.namespace_prefix.len() + name.len() + self.namespace_suffix.len(),
        );
        ns.push_str(parent);
        ns.push_str(&self.namespace_prefix);
        ns.push_str(name);
        ns.push_str(&self.namespace_suffix);
        ns
    }
}
