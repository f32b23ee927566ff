use super::{FieldMapping, RelationMapping};
use crate::{Error, Result};

/// Declarative metadata of one model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    /// Remote business object name
    pub type_name: String,

    /// Mapped fields, in declaration order
    pub fields: Vec<FieldMapping>,

    /// Properties declared as keys, mapped or not
    pub keys: Vec<String>,

    /// Navigation properties
    pub relations: Vec<RelationMapping>,
}

impl ModelSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: vec![],
            keys: vec![],
            relations: vec![],
        }
    }

    /// Checks the metadata is self-consistent.
    ///
    /// Every key must carry a field mapping and no two mappings may share an
    /// external name or a property.
    pub fn validate(&self) -> Result<()> {
        for key in &self.keys {
            match self.field_by_property(key) {
                Some(field) if field.key => {}
                _ => {
                    return Err(Error::mapping(format!(
                        "`{}.{}` is declared as a key but has no field mapping",
                        self.type_name, key
                    )))
                }
            }
        }

        for (i, field) in self.fields.iter().enumerate() {
            let duplicate = self.fields[..i].iter().any(|other| {
                other.property == field.property || other.name.eq_ignore_ascii_case(&field.name)
            });

            if duplicate {
                return Err(Error::mapping(format!(
                    "`{}.{}` maps to field `{}` more than once",
                    self.type_name, field.property, field.name
                )));
            }
        }

        Ok(())
    }

    pub fn writable_fields(&self) -> impl Iterator<Item = &FieldMapping> + '_ {
        self.fields.iter().filter(|field| field.writable)
    }

    pub fn key_fields(&self) -> impl Iterator<Item = &FieldMapping> + '_ {
        self.fields.iter().filter(|field| field.key)
    }

    pub fn field_by_property(&self, property: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|field| field.property == property)
    }

    pub fn field_by_index(&self, index: usize) -> Option<&FieldMapping> {
        self.fields.iter().find(|field| field.index == index)
    }

    pub fn relation_by_property(&self, property: &str) -> Option<&RelationMapping> {
        self.relations
            .iter()
            .find(|relation| relation.property == property)
    }

    pub fn relation_by_index(&self, index: usize) -> Option<&RelationMapping> {
        self.relations.iter().find(|relation| relation.index == index)
    }
}
