use super::BinaryOp;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A clause operator understood by the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Contains,
    Like,
    NotLike,
    Empty,
    NotEmpty,
}

impl Operator {
    /// Returns `false` for operators that ignore the clause value.
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::Empty | Self::NotEmpty)
    }
}

impl From<BinaryOp> for Operator {
    fn from(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Eq => Self::Equal,
            BinaryOp::Ne => Self::NotEqual,
            BinaryOp::Gt => Self::GreaterThan,
            BinaryOp::Lt => Self::LessThan,
            BinaryOp::Ge => Self::GreaterOrEqual,
            BinaryOp::Le => Self::LessOrEqual,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Operator::*;

        let s = match self {
            Equal => "=",
            NotEqual => "!=",
            GreaterThan => ">",
            LessThan => "<",
            GreaterOrEqual => ">=",
            LessOrEqual => "<=",
            Contains => "contains",
            Like => "like",
            NotLike => "not like",
            Empty => "is empty",
            NotEmpty => "is not empty",
        };
        f.write_str(s)
    }
}
