use super::{ErrorSet, ValidateAttr};

use syn::parse::ParseStream;

#[derive(Debug)]
pub(crate) struct Field {
    /// Index of the field in the containing struct
    pub(crate) index: usize,

    pub(crate) ident: syn::Ident,

    pub(crate) ty: syn::Type,

    pub(crate) kind: FieldKind,

    /// Set by `#[key]`
    pub(crate) key: bool,
}

#[derive(Debug)]
pub(crate) enum FieldKind {
    /// `#[record_id]`: the remote record id, an implicit read-only key
    RecordId,

    /// `#[field]`: a mapped remote field
    Mapped(Mapping),

    /// `#[relationship("Name")]`: a navigation property
    Relationship(syn::LitStr),

    /// No attribute; loaded as `Default::default()`
    Unmapped,
}

#[derive(Debug)]
pub(crate) struct Mapping {
    /// External field name; the property name when none is given
    pub(crate) name: String,

    pub(crate) read_only: bool,

    pub(crate) validate: Option<ValidateAttr>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field, index: usize) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(
                field,
                "business object fields must be named",
            ));
        };

        let mut errs = ErrorSet::new();
        let mut kind = FieldKind::Unmapped;
        let mut kind_attr: Option<&syn::Attribute> = None;
        let mut key = false;
        let mut validate = None;

        for attr in &field.attrs {
            let next = if attr.path().is_ident("record_id") {
                if !matches!(attr.meta, syn::Meta::Path(_)) {
                    errs.spanned(attr, "`#[record_id]` takes no arguments");
                }
                Some(FieldKind::RecordId)
            } else if attr.path().is_ident("field") {
                match parse_mapping(attr, ident) {
                    Ok(mapping) => Some(FieldKind::Mapped(mapping)),
                    Err(err) => {
                        errs.push(err);
                        continue;
                    }
                }
            } else if attr.path().is_ident("relationship") {
                match parse_relationship(attr) {
                    Ok(name) => Some(FieldKind::Relationship(name)),
                    Err(err) => {
                        errs.push(err);
                        continue;
                    }
                }
            } else if attr.path().is_ident("key") {
                if key {
                    errs.spanned(attr, "duplicate #[key] attribute");
                }
                key = true;
                None
            } else if attr.path().is_ident("validate") {
                if validate.is_some() {
                    errs.spanned(attr, "duplicate #[validate] attribute");
                }
                match ValidateAttr::from_ast(attr) {
                    Ok(attr) => validate = Some(attr),
                    Err(err) => errs.push(err),
                }
                None
            } else {
                None
            };

            if let Some(next) = next {
                if kind_attr.is_some() {
                    errs.spanned(
                        attr,
                        "a field takes one of #[record_id], #[field] or #[relationship]",
                    );
                } else {
                    kind = next;
                    kind_attr = Some(attr);
                }
            }
        }

        if let Some(validate) = validate {
            match &mut kind {
                FieldKind::Mapped(mapping) => mapping.validate = Some(validate),
                _ => errs.spanned(
                    &validate.validator,
                    "#[validate] requires the field to be mapped with #[field]",
                ),
            }
        }

        if key && matches!(kind, FieldKind::Relationship(_)) {
            errs.spanned(field, "a relationship cannot be a key");
        }

        errs.finish()?;

        Ok(Self {
            index,
            ident: ident.clone(),
            ty: field.ty.clone(),
            kind,
            key,
        })
    }

    /// The external field name, when the field maps onto one.
    pub(crate) fn external_name(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Mapped(mapping) => Some(&mapping.name),
            _ => None,
        }
    }

    pub(crate) fn is_relationship(&self) -> bool {
        matches!(self.kind, FieldKind::Relationship(_))
    }
}

/// `#[field]`, `#[field("Name")]` or `#[field(name = "Name", read_only)]`
fn parse_mapping(attr: &syn::Attribute, ident: &syn::Ident) -> syn::Result<Mapping> {
    let mut mapping = Mapping {
        name: ident.to_string(),
        read_only: false,
        validate: None,
    };

    if let syn::Meta::Path(_) = attr.meta {
        return Ok(mapping);
    }

    attr.parse_args_with(|input: ParseStream| {
        let mut named = false;

        while !input.is_empty() {
            if input.peek(syn::LitStr) {
                let name: syn::LitStr = input.parse()?;
                if named {
                    return Err(syn::Error::new_spanned(name, "duplicate field name"));
                }
                mapping.name = name.value();
                named = true;
            } else {
                let option: syn::Ident = input.parse()?;

                if option == "name" {
                    input.parse::<syn::Token![=]>()?;
                    let name: syn::LitStr = input.parse()?;
                    if named {
                        return Err(syn::Error::new_spanned(name, "duplicate field name"));
                    }
                    mapping.name = name.value();
                    named = true;
                } else if option == "read_only" {
                    mapping.read_only = true;
                } else {
                    return Err(syn::Error::new_spanned(
                        option,
                        "expected a field name, `name = \"...\"` or `read_only`",
                    ));
                }
            }

            if !input.is_empty() {
                input.parse::<syn::Token![,]>()?;
            }
        }

        Ok(())
    })?;

    if mapping.name.is_empty() {
        return Err(syn::Error::new_spanned(attr, "field name cannot be empty"));
    }

    Ok(mapping)
}

/// `#[relationship("Name")]` or `#[relationship(name = "Name")]`
fn parse_relationship(attr: &syn::Attribute) -> syn::Result<syn::LitStr> {
    attr.parse_args_with(|input: ParseStream| {
        if input.peek(syn::LitStr) {
            return input.parse();
        }

        let option: syn::Ident = input.parse()?;
        if option != "name" {
            return Err(syn::Error::new_spanned(
                option,
                "expected a relationship name",
            ));
        }
        input.parse::<syn::Token![=]>()?;
        input.parse()
    })
}
