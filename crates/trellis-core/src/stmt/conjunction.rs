use serde::{Deserialize, Serialize};
use std::fmt;

/// How the clauses of one query combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    pub fn is_and(self) -> bool {
        matches!(self, Self::And)
    }

    pub fn is_or(self) -> bool {
        matches!(self, Self::Or)
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
