use super::*;

/// An untyped boolean predicate over a model's fields.
///
/// The node set is closed. Only some shapes translate into remote clauses;
/// the rest exist so the typed DSL can express them and the translator can
/// reject them by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND of all operands
    And(ExprAnd),

    /// OR of all operands
    Or(ExprOr),

    /// Negation
    Not(ExprNot),

    /// Comparison of two expressions
    BinaryOp(ExprBinaryOp),

    /// Reference to a model field
    Field(ExprField),

    /// Literal value, evaluated when the predicate was built
    Value(Value),

    /// Null check on an expression
    IsNull(ExprIsNull),

    /// Membership in a list of values
    InList(ExprInList),
}

impl Expr {
    /// Name of the node kind, used when rejecting a node.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::And(_) => "and",
            Self::Or(_) => "or",
            Self::Not(_) => "not",
            Self::BinaryOp(_) => "binary op",
            Self::Field(_) => "field",
            Self::Value(Value::Null) => "null value",
            Self::Value(_) => "value",
            Self::IsNull(_) => "is null",
            Self::InList(_) => "in list",
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field(_))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}
