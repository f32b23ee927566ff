use super::Expr;

/// Reference to a property of a model.
///
/// `name` is the external field name when the property carries a field
/// mapping; translation falls back to `property` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprField {
    /// Remote type name of the model owning the property
    pub model: &'static str,

    /// Rust property name
    pub property: &'static str,

    /// Mapped external field name
    pub name: Option<&'static str>,

    /// Position of the property in the model
    pub index: usize,
}

impl ExprField {
    /// The field name to send to the remote store.
    pub fn external_name(&self) -> &'static str {
        self.name.unwrap_or(self.property)
    }
}

impl From<ExprField> for Expr {
    fn from(value: ExprField) -> Self {
        Self::Field(value)
    }
}
