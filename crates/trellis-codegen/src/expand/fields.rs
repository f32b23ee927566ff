use super::Expand;
use crate::schema::FieldKind;

use proc_macro2::{Literal, TokenStream};
use quote::quote;

impl Expand<'_> {
    /// The struct returned by `Model::fields()`, with one typed accessor per
    /// property.
    pub(super) fn expand_field_struct(&self) -> TokenStream {
        let trellis = &self.trellis;
        let vis = &self.model.vis;
        let model_ident = &self.model.ident;
        let field_struct_ident = &self.model.field_struct_ident;
        let type_name = &self.model.type_name;

        let methods = self.model.fields.iter().map(|field| {
            let ident = &field.ident;
            let ty = &field.ty;
            let index = Literal::usize_unsuffixed(field.index);
            let property = ident.to_string();

            match &field.kind {
                FieldKind::Relationship(name) => quote! {
                    #vis fn #ident(&self) -> #trellis::Relation<
                        #model_ident,
                        <#ty as #trellis::Related>::Target,
                    > {
                        #trellis::Relation::new(
                            #property,
                            #name,
                            #index,
                            <#ty as #trellis::Related>::COLLECTION,
                        )
                    }
                },
                kind => {
                    let name = match kind {
                        FieldKind::RecordId => quote!(Some(#trellis::RECORD_ID_FIELD)),
                        _ => match field.external_name() {
                            Some(name) => quote!(Some(#name)),
                            None => quote!(None),
                        },
                    };

                    quote! {
                        #vis fn #ident(&self) -> #trellis::Path<#model_ident, #ty> {
                            #trellis::Path::new(#trellis::ExprField {
                                model: #type_name,
                                property: #property,
                                name: #name,
                                index: #index,
                            })
                        }
                    }
                }
            }
        });

        quote! {
            #vis struct #field_struct_ident {
                _priv: (),
            }

            impl #field_struct_ident {
                #( #methods )*
            }
        }
    }
}
