use crate::{Error, Result};

use serde::{Deserialize, Serialize};

/// A business object type as defined by the remote schema repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessObjectDef {
    /// Remote type identifier
    pub id: String,

    pub name: String,

    pub fields: Vec<FieldDef>,

    #[serde(default)]
    pub relationships: Vec<RelationshipDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Internal field name
    pub name: String,

    /// Name shown to users, may differ from `name`
    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(rename = "type")]
    pub ty: FieldType,

    /// Saving fails while a required field is blank
    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Number,
    Date,
    DateTime,
    Logical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipDef {
    pub name: String,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Name of the related business object type
    pub target: String,

    /// Field on the related record holding the parent's record id, if the
    /// relationship is keyed that way
    #[serde(default)]
    pub foreign_key: Option<String>,
}

impl BusinessObjectDef {
    /// Finds a field by internal or display name, ignoring case.
    pub fn field_by_name(&self, name: &str) -> Result<&FieldDef> {
        self.fields
            .iter()
            .find(|field| field.is_named(name))
            .ok_or_else(|| Error::field_not_found(name, &self.name))
    }

    /// Finds a relationship by name, falling back to display names.
    pub fn relationship_by_name(&self, name: &str) -> Result<&RelationshipDef> {
        self.relationships
            .iter()
            .find(|rel| rel.name.eq_ignore_ascii_case(name))
            .or_else(|| {
                self.relationships.iter().find(|rel| {
                    rel.display_name
                        .as_deref()
                        .is_some_and(|display| display.eq_ignore_ascii_case(name))
                })
            })
            .ok_or_else(|| Error::relationship_not_found(name, &self.name))
    }
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            ty,
            required: false,
            read_only: false,
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .display_name
                .as_deref()
                .is_some_and(|display| display.eq_ignore_ascii_case(name))
    }
}
