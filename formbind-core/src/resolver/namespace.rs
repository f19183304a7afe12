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

//! Bracket segment index over the keys of one decode call.
//!
//! For every `[`...`]` segment of every key, the text in front of the opening
//! bracket is the alias and the bracket content is an entry under it:
//! `a[0][city]` yields entry `0` under alias `a` and entry `city` under alias
//! `a[0]`. Digit-only entries also carry their numeric index so lists know
//! how far to grow.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::Error;

/// One bracket segment found under an alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BracketEntry {
    /// Text between the brackets.
    pub key: String,
    /// The segment with its brackets, appended to the alias to address the entry.
    pub search_token: String,
    /// Numeric position, `None` when the key is not a number.
    pub index: Option<usize>,
}

/// Entries found under one alias, in key order of discovery.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasIndex {
    /// Largest numeric entry, zero when there is none.
    pub max_index: usize,
    pub entries: Vec<BracketEntry>,
}

#[derive(Clone, Debug, Default)]
pub struct NamespaceIndex {
    aliases: HashMap<String, Arc<AliasIndex>>,
    max_key_len: usize,
}

impl NamespaceIndex {
    /// Index with no aliases, used when parsing failed.
    pub fn empty(max_key_len: usize) -> Self {
        NamespaceIndex {
            aliases: HashMap::new(),
            max_key_len,
        }
    }

    #[inline(always)]
    pub fn alias(&self, alias: &str) -> Option<Arc<AliasIndex>> {
        self.aliases.get(alias).cloned()
    }

    /// Length of the longest key, bounding how deep records may be walked.
    #[inline(always)]
    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Length of the longest key.
pub fn max_key_len<'a, I: IntoIterator<Item = &'a str>>(keys: I) -> usize {
    keys.into_iter().map(str::len).max().unwrap_or(0)
}

/// Builds the alias index of `keys`.
///
/// Fails with a malformed-namespace error on the first key holding a `]`
/// without a matching `[`, or ending inside a bracket.
pub fn parse_namespaces<'a, I: IntoIterator<Item = &'a str>>(keys: I) -> Result<NamespaceIndex, Error> {
    let mut building: HashMap<String, (AliasIndex, HashSet<String>)> = HashMap::new();
    let mut longest = 0;

    for key in keys {
        longest = longest.max(key.len());
        let bytes = key.as_bytes();
        let mut open = 0;
        let mut inside = false;
        let mut numeric = false;

        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'[' => {
                    open = i;
                    inside = true;
                    numeric = true;
                }
                b']' => {
                    if !inside {
                        return Err(Error::malformed_namespace(key, '['));
                    }
                    inside = false;
                    let (alias, seen) = building.entry(key[..open].to_string()).or_default();
                    let search_token = &key[open..=i];
                    if !seen.insert(search_token.to_string()) {
                        continue;
                    }
                    let entry_key = &key[open + 1..i];
                    let index = if numeric {
                        entry_key.parse::<usize>().ok()
                    } else {
                        None
                    };
                    if let Some(index) = index {
                        alias.max_index = alias.max_index.max(index);
                    }
                    alias.entries.push(BracketEntry {
                        key: entry_key.to_string(),
                        search_token: search_token.to_string(),
                        index,
                    });
                }
                b'0'..=b'9' => {}
                _ => {
                    if inside {
                        numeric = false;
                    }
                }
            }
        }

        if inside {
            return Err(Error::malformed_namespace(key, ']'));
        }
    }

    Ok(NamespaceIndex {
        aliases: building
            .into_iter()
            .map(|(alias, (index, _))| (alias, Arc::new(index)))
            .collect(),
        max_key_len: longest,
    })
}
