use super::Expand;
use crate::schema::FieldKind;

use proc_macro2::{Literal, TokenStream};
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_model_schema(&self) -> TokenStream {
        let trellis = &self.trellis;
        let type_name = &self.model.type_name;

        let mut mappings = vec![];
        let mut keys = vec![];
        let mut relations = vec![];

        for field in &self.model.fields {
            let index = Literal::usize_unsuffixed(field.index);
            let property = field.ident.to_string();
            let ty = &field.ty;

            match &field.kind {
                FieldKind::RecordId => {
                    mappings.push(quote! {
                        #trellis::FieldMapping::new(#index, #property, #trellis::RECORD_ID_FIELD)
                            .read_only()
                            .key()
                    });
                    keys.push(property);
                }
                FieldKind::Mapped(mapping) => {
                    let name = &mapping.name;
                    let mut expr = quote!(#trellis::FieldMapping::new(#index, #property, #name));

                    if mapping.read_only {
                        expr = quote!(#expr.read_only());
                    }

                    if field.key {
                        expr = quote!(#expr.key());
                        keys.push(property);
                    }

                    if let Some(validate) = &mapping.validate {
                        let throws = validate.throws;
                        let message = match &validate.message {
                            Some(message) => quote!(Some(#message)),
                            None => quote!(None),
                        };
                        expr = quote!(#expr.validated(#throws, #message));
                    }

                    mappings.push(expr);
                }
                FieldKind::Relationship(name) => {
                    let target = quote!(<#ty as #trellis::Related>::Target);
                    relations.push(quote! {
                        #trellis::RelationMapping {
                            index: #index,
                            property: #property.to_string(),
                            name: #name.to_string(),
                            target: <#target as #trellis::BusinessObject>::TYPE_NAME.to_string(),
                            collection: <#ty as #trellis::Related>::COLLECTION,
                        }
                    });
                }
                FieldKind::Unmapped => {
                    // An unmapped key fails schema validation at runtime
                    if field.key {
                        keys.push(property);
                    }
                }
            }
        }

        quote! {
            fn schema() -> #trellis::ModelSchema {
                let mut schema = #trellis::ModelSchema::new(#type_name);
                schema.fields = vec![ #( #mappings ),* ];
                schema.keys = vec![ #( #keys.to_string() ),* ];
                schema.relations = vec![ #( #relations ),* ];
                schema
            }
        }
    }
}
