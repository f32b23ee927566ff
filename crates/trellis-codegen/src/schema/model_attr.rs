/// `#[business_object(name = "...", handler = path::ToHandler)]`
#[derive(Debug, Default)]
pub(crate) struct ModelAttr {
    /// Remote business object name; defaults to the struct name
    pub(crate) name: Option<syn::LitStr>,

    /// Custom handler type
    pub(crate) handler: Option<syn::Path>,
}

impl ModelAttr {
    pub(super) fn populate_from_ast(&mut self, attrs: &[syn::Attribute]) -> syn::Result<()> {
        for attr in attrs {
            if !attr.path().is_ident("business_object") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    if self.name.is_some() {
                        return Err(meta.error("duplicate `name`"));
                    }
                    self.name = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("handler") {
                    if self.handler.is_some() {
                        return Err(meta.error("duplicate `handler`"));
                    }
                    self.handler = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("expected `name = \"...\"` or `handler = Type`"))
                }
            })?;
        }

        Ok(())
    }
}
