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

use syn::{Field, Fields, GenericArgument, PathArguments, Type, TypePath, TypeTraitObject};

/// A named field together with its declaration position.
#[derive(Clone)]
pub struct SourceField<'a> {
    pub index: usize,
    pub field: &'a Field,
    pub ident: &'a syn::Ident,
}

/// Returns the fields of a struct with named fields in declaration order.
pub fn source_fields(fields: &Fields) -> syn::Result<Vec<SourceField<'_>>> {
    match fields {
        Fields::Named(named) => Ok(named
            .named
            .iter()
            .enumerate()
            .filter_map(|(index, field)| field.ident.as_ref().map(|ident| SourceField { index, field, ident }))
            .collect()),
        Fields::Unit => Ok(Vec::new()),
        Fields::Unnamed(unnamed) => Err(syn::Error::new_spanned(
            unnamed,
            "FormObject requires named fields, tuple structs have no field names to bind",
        )),
    }
}

/// Returns the first generic argument of `ty` when its last path segment is `wrapper`.
fn generic_arg<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if let Type::Path(TypePath { path, .. }) = ty {
        if let Some(seg) = path.segments.last() {
            if seg.ident == wrapper {
                if let PathArguments::AngleBracketed(args) = &seg.arguments {
                    if let Some(GenericArgument::Type(inner)) = args.args.first() {
                        return Some(inner);
                    }
                }
            }
        }
    }
    None
}

/// Check if a type is `Box<dyn Trait>` and return the trait object if it is
pub fn is_box_dyn_trait(ty: &Type) -> Option<&TypeTraitObject> {
    match generic_arg(ty, "Box") {
        Some(Type::TraitObject(trait_obj)) => Some(trait_obj),
        _ => None,
    }
}

/// Check if a type is `Option<Box<dyn Trait>>`.
pub fn is_option_box_dyn_trait(ty: &Type) -> bool {
    generic_arg(ty, "Option").and_then(is_box_dyn_trait).is_some()
}
