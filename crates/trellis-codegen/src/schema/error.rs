use quote::ToTokens;
use std::fmt::Display;

/// Collects attribute errors so one expansion reports all of them.
#[derive(Debug, Default)]
pub(crate) struct ErrorSet {
    errors: Vec<syn::Error>,
}

impl ErrorSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, err: syn::Error) {
        self.errors.push(err);
    }

    pub(crate) fn spanned(&mut self, tokens: impl ToTokens, message: impl Display) {
        self.push(syn::Error::new_spanned(tokens, message));
    }

    pub(crate) fn finish(self) -> syn::Result<()> {
        let combined = self.errors.into_iter().reduce(|mut acc, err| {
            acc.combine(err);
            acc
        });

        match combined {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
