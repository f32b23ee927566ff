mod fields;
mod model;
mod schema;

use crate::schema::Model;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The model being expanded
    model: &'a Model,

    /// Path prefix for trellis types
    trellis: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let model_impls = self.expand_model_impls();
        let field_struct = self.expand_field_struct();

        wrap_in_const(quote! {
            #model_impls
            #field_struct
        })
    }
}

pub(super) fn model(model: &Model) -> TokenStream {
    Expand {
        model,
        trellis: quote!(_trellis::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use trellis as _trellis;
            #code
        };
    }
}
