use super::Expand;
use crate::schema::FieldKind;

use proc_macro2::{Literal, TokenStream};
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_model_impls(&self) -> TokenStream {
        let trellis = &self.trellis;
        let vis = &self.model.vis;
        let model_ident = &self.model.ident;
        let field_struct_ident = &self.model.field_struct_ident;
        let type_name = &self.model.type_name;
        let handler = match &self.model.handler {
            Some(handler) => quote!(#handler),
            None => quote!(#trellis::DefaultHandler),
        };
        let model_schema = self.expand_model_schema();
        let record_id_methods = self.expand_record_id_methods();
        let field_value_arms = self.expand_field_value_arms();
        let validate_method = self.expand_validate_method();
        let load_fields = self.expand_load_fields();
        let load_relation_method = self.expand_load_relation_method();

        quote! {
            impl #model_ident {
                #vis fn fields() -> #field_struct_ident {
                    #field_struct_ident { _priv: () }
                }

                #vis fn query() -> #trellis::Query<#model_ident> {
                    #trellis::Query::all()
                }
            }

            impl #trellis::BusinessObject for #model_ident {
                const TYPE_NAME: &'static str = #type_name;

                type Handler = #handler;

                #model_schema

                #record_id_methods

                fn field_value(&self, index: usize) -> #trellis::Value {
                    match index {
                        #( #field_value_arms )*
                        _ => #trellis::Value::Null,
                    }
                }

                #validate_method

                fn load(row: &#trellis::Row) -> #trellis::Result<Self> {
                    Ok(Self {
                        #( #load_fields )*
                    })
                }

                #load_relation_method
            }
        }
    }

    fn expand_record_id_methods(&self) -> TokenStream {
        // `Model::from_ast` guarantees exactly one record id field
        let Some(field) = self.model.record_id() else {
            return TokenStream::new();
        };
        let ident = &field.ident;

        quote! {
            fn record_id(&self) -> Option<&str> {
                self.#ident.as_deref()
            }

            fn set_record_id(&mut self, record_id: String) {
                self.#ident = Some(record_id);
            }
        }
    }

    fn expand_field_value_arms(&self) -> Vec<TokenStream> {
        let trellis = &self.trellis;

        self.model
            .fields
            .iter()
            .filter(|field| matches!(field.kind, FieldKind::RecordId | FieldKind::Mapped(_)))
            .map(|field| {
                let index = Literal::usize_unsuffixed(field.index);
                let ident = &field.ident;
                let ty = &field.ty;

                quote! {
                    #index => <#ty as #trellis::Primitive>::to_value(&self.#ident),
                }
            })
            .collect()
    }

    fn expand_validate_method(&self) -> TokenStream {
        let trellis = &self.trellis;
        let model_ident = &self.model.ident;

        let arms: Vec<_> = self
            .model
            .fields
            .iter()
            .filter_map(|field| {
                let FieldKind::Mapped(mapping) = &field.kind else {
                    return None;
                };
                let validate = mapping.validate.as_ref()?;

                let index = Literal::usize_unsuffixed(field.index);
                let validator = &validate.validator;
                let property = field.ident.to_string();

                Some(quote! {
                    #index => <#validator as #trellis::Validator<#model_ident>>::validate(
                        #property, value, self,
                    ),
                })
            })
            .collect();

        if arms.is_empty() {
            return TokenStream::new();
        }

        quote! {
            fn validate(&self, index: usize, value: &#trellis::Value) -> bool {
                match index {
                    #( #arms )*
                    _ => true,
                }
            }
        }
    }

    fn expand_load_fields(&self) -> Vec<TokenStream> {
        let trellis = &self.trellis;

        self.model
            .fields
            .iter()
            .map(|field| {
                let ident = &field.ident;
                let ty = &field.ty;
                let property = ident.to_string();

                match &field.kind {
                    FieldKind::RecordId => {
                        let name = quote!(#trellis::RECORD_ID_FIELD);
                        quote! {
                            #ident: #trellis::load_field::<#ty>(row, #name, #property)?,
                        }
                    }
                    FieldKind::Mapped(mapping) => {
                        let name = &mapping.name;
                        quote! {
                            #ident: #trellis::load_field::<#ty>(row, #name, #property)?,
                        }
                    }
                    FieldKind::Relationship(_) | FieldKind::Unmapped => quote! {
                        #ident: ::core::default::Default::default(),
                    },
                }
            })
            .collect()
    }

    fn expand_load_relation_method(&self) -> TokenStream {
        let trellis = &self.trellis;

        let arms: Vec<_> = self
            .model
            .fields
            .iter()
            .filter(|field| field.is_relationship())
            .map(|field| {
                let index = Literal::usize_unsuffixed(field.index);
                let ident = &field.ident;
                let ty = &field.ty;

                quote! {
                    #index => {
                        self.#ident = <#ty as #trellis::Related>::load_rows(rows)?;
                        Ok(())
                    }
                }
            })
            .collect();

        if arms.is_empty() {
            return TokenStream::new();
        }

        quote! {
            fn load_relation(
                &mut self,
                index: usize,
                rows: Vec<#trellis::Row>,
            ) -> #trellis::Result<()> {
                match index {
                    #( #arms )*
                    _ => Ok(()),
                }
            }
        }
    }
}
