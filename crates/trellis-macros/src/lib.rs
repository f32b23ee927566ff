extern crate proc_macro;

use proc_macro::TokenStream;

#[proc_macro_derive(
    BusinessObject,
    attributes(business_object, record_id, field, key, validate, relationship)
)]
pub fn derive_business_object(input: TokenStream) -> TokenStream {
    match trellis_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
