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

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Data, DeriveInput, GenericParam, Generics, Visibility};

use crate::object::field_meta::parse_field_meta;
use crate::util::{is_option_box_dyn_trait, source_fields, SourceField};

fn has_existing_default(ast: &DeriveInput) -> bool {
    ast.attrs.iter().any(|attr| {
        attr.path().is_ident("derive") && {
            let mut has_default = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("Default") {
                    has_default = true;
                }
                Ok(())
            });
            has_default
        }
    })
}

/// Adds `FormValue` bounds to every type parameter.
fn add_trait_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(tp) = param {
            tp.bounds.push(parse_quote!(formbind_core::codec::FormValue));
        }
    }
    generics
}

struct FieldCode {
    decl: TokenStream,
    default: TokenStream,
    decode_arm: TokenStream,
    encode_arm: TokenStream,
    typed_arm: TokenStream,
    has_value: TokenStream,
}

fn gen_field(source: &SourceField<'_>) -> syn::Result<FieldCode> {
    let meta = parse_field_meta(source.field)?;
    let index = source.index;
    let ident = source.ident;
    let ident_str = ident.to_string();
    let ty = &source.field.ty;
    let is_public = !matches!(source.field.vis, Visibility::Inherited);
    let is_embedded = meta.embed;
    let tag_keys = meta.tags.iter().map(|(k, _)| k);
    let tag_values = meta.tags.iter().map(|(_, v)| v);
    let tags = quote! { &[#((#tag_keys, #tag_values)),*] };

    if is_option_box_dyn_trait(ty) {
        return Ok(FieldCode {
            decl: quote! {
                formbind_core::resolver::shape::FieldDecl {
                    index: #index,
                    ident: #ident_str,
                    tags: #tags,
                    is_public: #is_public,
                    is_embedded: #is_embedded,
                    is_trait_object: true,
                    kind: formbind_core::types::FieldKind::Opaque,
                    record: formbind_core::resolver::shape::no_record,
                }
            },
            default: quote! { #ident: ::std::option::Option::None },
            decode_arm: quote! { #index => false, },
            encode_arm: quote! { #index => {} },
            typed_arm: quote! { #index => ::std::option::Option::None, },
            has_value: quote! { self.#ident.is_some() },
        });
    }

    Ok(FieldCode {
        decl: quote! {
            formbind_core::resolver::shape::FieldDecl {
                index: #index,
                ident: #ident_str,
                tags: #tags,
                is_public: #is_public,
                is_embedded: #is_embedded,
                is_trait_object: false,
                kind: <#ty as formbind_core::codec::FormValue>::form_kind(),
                record: <#ty as formbind_core::codec::FormValue>::form_record,
            }
        },
        default: quote! { #ident: <#ty as formbind_core::codec::FormDefault>::form_default() },
        decode_arm: quote! {
            #index => formbind_core::codec::decode_value(&mut self.#ident, ctx, namespace, 0, false),
        },
        encode_arm: quote! {
            #index => formbind_core::codec::encode_value(&self.#ident, ctx, namespace, position, field),
        },
        typed_arm: quote! {
            #index => formbind_core::codec::FormValue::form_typed(&self.#ident),
        },
        has_value: quote! { formbind_core::codec::FormValue::form_has_value(&self.#ident) },
    })
}

pub fn derive_form_object(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    let data = match &ast.data {
        Data::Struct(s) => s,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span,
                "FormObject can only be derived for structs with named fields",
            ))
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span,
                "FormObject can only be derived for structs with named fields",
            ))
        }
    };
    if let Some(lt) = ast.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lt,
            "FormObject types must be 'static, lifetime parameters are not supported",
        ));
    }

    let fields = source_fields(&data.fields)?;
    let codes = fields.iter().map(gen_field).collect::<syn::Result<Vec<_>>>()?;

    let generics = add_trait_bounds(ast.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let decls = codes.iter().map(|c| &c.decl);
    let decode_arms = codes.iter().map(|c| &c.decode_arm);
    let encode_arms = codes.iter().map(|c| &c.encode_arm);
    let typed_arms = codes.iter().map(|c| &c.typed_arm);
    let has_values = codes.iter().map(|c| &c.has_value);

    let default_body = if has_existing_default(ast) {
        quote! { <Self as ::std::default::Default>::default() }
    } else {
        let inits = codes.iter().map(|c| &c.default);
        quote! { Self { #(#inits),* } }
    };

    Ok(quote! {
        impl #impl_generics formbind_core::codec::FormDefault for #name #ty_generics #where_clause {
            fn form_default() -> Self {
                #default_body
            }
        }

        impl #impl_generics formbind_core::codec::FormRecord for #name #ty_generics #where_clause {
            fn form_fields() -> ::std::vec::Vec<formbind_core::resolver::shape::FieldDecl> {
                ::std::vec![#(#decls),*]
            }

            #[allow(unused_variables)]
            fn form_decode_field(
                &mut self,
                index: usize,
                ctx: &mut formbind_core::resolver::context::DecodeContext<'_>,
                namespace: &str,
            ) -> bool {
                match index {
                    #(#decode_arms)*
                    _ => false,
                }
            }

            fn form_typed_field(
                &self,
                index: usize,
            ) -> ::std::option::Option<formbind_core::encoder::TypedValue> {
                match index {
                    #(#typed_arms)*
                    _ => ::std::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn form_encode_field(
                &self,
                index: usize,
                ctx: &mut formbind_core::resolver::context::EncodeContext<'_>,
                namespace: &str,
                position: formbind_core::types::Position,
                field: &formbind_core::resolver::shape::FieldMeta,
            ) {
                match index {
                    #(#encode_arms)*
                    _ => {}
                }
            }
        }

        impl #impl_generics formbind_core::codec::FormValue for #name #ty_generics #where_clause {
            #[inline(always)]
            fn form_kind() -> formbind_core::types::FieldKind {
                formbind_core::types::FieldKind::Record
            }

            fn form_record() -> ::std::option::Option<formbind_core::resolver::shape::RecordType> {
                ::std::option::Option::Some(formbind_core::resolver::shape::RecordType::of::<Self>())
            }

            fn form_decode(
                &mut self,
                ctx: &mut formbind_core::resolver::context::DecodeContext<'_>,
                namespace: &str,
                _idx: usize,
                _in_option: bool,
            ) -> bool {
                formbind_core::codec::struct_::decode_record(self, ctx, namespace)
            }

            fn form_encode(
                &self,
                ctx: &mut formbind_core::resolver::context::EncodeContext<'_>,
                namespace: &str,
                position: formbind_core::types::Position,
            ) {
                formbind_core::codec::struct_::encode_record(self, ctx, namespace, position)
            }

            fn form_has_value(&self) -> bool {
                false #(|| #has_values)*
            }

            fn form_decode_root(&mut self, ctx: &mut formbind_core::resolver::context::DecodeContext<'_>) -> bool {
                formbind_core::codec::struct_::decode_fields(self, ctx, "")
            }

            fn form_encode_root(&self, ctx: &mut formbind_core::resolver::context::EncodeContext<'_>) {
                formbind_core::codec::struct_::encode_fields(self, ctx, "", formbind_core::types::Position::Field)
            }
        }
    })
}
