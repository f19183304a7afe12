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

//! Field-level attribute parsing.
//!
//! - `#[tag(key = "value", ...)]`: raw tags, read at runtime through the
//!   configured tag name (`form = "name,omitempty"`, `collection_format = "csv"`)
//! - `#[form(embed)]`: flatten the field into its parent record

use syn::ext::IdentExt;
use syn::{Field, LitStr};

const LIST_FORMATS: &[&str] = &["csv", "tsv", "ssv", "pipes"];

/// Represents parsed field attributes
#[derive(Debug, Clone, Default)]
pub struct FormFieldMeta {
    pub tags: Vec<(String, String)>,
    pub embed: bool,
}

/// Parse `#[tag(...)]` and `#[form(...)]` attributes from a field
pub fn parse_field_meta(field: &Field) -> syn::Result<FormFieldMeta> {
    let mut meta = FormFieldMeta::default();

    for attr in &field.attrs {
        if attr.path().is_ident("tag") {
            attr.parse_nested_meta(|nested| {
                let key = match nested.path.get_ident() {
                    Some(ident) => ident.unraw().to_string(),
                    None => return Err(nested.error("tag keys must be plain identifiers")),
                };
                let lit: LitStr = nested.value()?.parse()?;
                let value = lit.value();
                if key == "collection_format" && !LIST_FORMATS.contains(&value.as_str()) {
                    return Err(syn::Error::new(
                        lit.span(),
                        format!("unknown collection_format '{}', expected one of csv, tsv, ssv, pipes", value),
                    ));
                }
                if meta.tags.iter().any(|(k, _)| *k == key) {
                    return Err(nested.error(format!("duplicate tag '{}'", key)));
                }
                meta.tags.push((key, value));
                Ok(())
            })?;
        } else if attr.path().is_ident("form") {
            attr.parse_nested_meta(|nested| {
                if nested.path.is_ident("embed") {
                    meta.embed = true;
                    Ok(())
                } else {
                    Err(nested.error("unsupported form attribute, expected `embed`"))
                }
            })?;
        }
    }

    Ok(meta)
}
