use super::{ErrorSet, Field, FieldKind, ModelAttr};

#[derive(Debug)]
pub(crate) struct Model {
    /// Remote business object name
    pub(crate) type_name: String,

    pub(crate) vis: syn::Visibility,

    pub(crate) ident: syn::Ident,

    pub(crate) fields: Vec<Field>,

    /// Custom handler type, if any
    pub(crate) handler: Option<syn::Path>,

    /// Identifier of the generated `fields()` accessor struct
    pub(crate) field_struct_ident: syn::Ident,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "business object fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "business object generics are not supported",
            ));
        }

        let mut model_attr = ModelAttr::default();
        let mut fields = vec![];
        let mut errs = ErrorSet::new();

        if let Err(err) = model_attr.populate_from_ast(&ast.attrs) {
            errs.push(err);
        }

        for (index, node) in node.named.iter().enumerate() {
            match Field::from_ast(node, index) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        errs.finish()?;

        let mut errs = ErrorSet::new();
        let record_ids: Vec<_> = fields
            .iter()
            .filter(|field| matches!(field.kind, FieldKind::RecordId))
            .collect();

        match &record_ids[..] {
            [] => errs.spanned(
                &ast.ident,
                "business objects need one `#[record_id]` field of type `Option<String>`",
            ),
            [_] => {}
            [_, extra, ..] => errs.spanned(&extra.ident, "duplicate #[record_id] field"),
        }

        errs.finish()?;

        let type_name = match &model_attr.name {
            Some(name) => name.value(),
            None => ast.ident.to_string(),
        };

        Ok(Self {
            type_name,
            vis: ast.vis.clone(),
            ident: ast.ident.clone(),
            fields,
            handler: model_attr.handler,
            field_struct_ident: syn::Ident::new(&format!("{}Fields", ast.ident), ast.ident.span()),
        })
    }

    pub(crate) fn record_id(&self) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| matches!(field.kind, FieldKind::RecordId))
    }
}
