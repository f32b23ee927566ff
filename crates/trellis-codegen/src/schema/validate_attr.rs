use syn::parse::{Parse, ParseStream};

/// `#[validate(Validator)]`, `#[validate(Validator, skip)]` or
/// `#[validate(Validator, message = "...")]`
#[derive(Debug)]
pub(crate) struct ValidateAttr {
    pub(crate) validator: syn::Path,

    /// Fail the write when the validator rejects the value
    pub(crate) throws: bool,

    pub(crate) message: Option<syn::LitStr>,
}

impl ValidateAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Self> {
        attr.parse_args()
    }
}

impl Parse for ValidateAttr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let validator = input.parse()?;
        let mut attr = Self {
            validator,
            throws: true,
            message: None,
        };

        while !input.is_empty() {
            input.parse::<syn::Token![,]>()?;
            if input.is_empty() {
                break;
            }

            let option: syn::Ident = input.parse()?;

            if option == "skip" {
                attr.throws = false;
            } else if option == "message" {
                input.parse::<syn::Token![=]>()?;
                attr.message = Some(input.parse()?);
            } else {
                return Err(syn::Error::new_spanned(
                    option,
                    "expected `skip` or `message = \"...\"`",
                ));
            }
        }

        if !attr.throws && attr.message.is_some() {
            return Err(input.error("`message` has no effect on a skipping validator"));
        }

        Ok(attr)
    }
}
