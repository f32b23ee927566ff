//! Code generation behind `#[derive(BusinessObject)]`.

mod expand;
mod schema;

use proc_macro2::TokenStream;
use syn::spanned::Spanned;

/// Expands a business object struct into its `BusinessObject` impl, typed
/// field accessors and schema metadata.
pub fn generate(input: TokenStream) -> syn::Result<TokenStream> {
    let item = match syn::parse2::<syn::Item>(input)? {
        syn::Item::Struct(item) => item,
        other => {
            return Err(syn::Error::new(
                other.span(),
                "`BusinessObject` can only be derived for structs",
            ))
        }
    };

    let model = schema::Model::from_ast(&item)?;
    Ok(expand::model(&model))
}
