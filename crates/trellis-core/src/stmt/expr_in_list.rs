use super::{Expr, Value};

/// Set membership. The remote filter language has no equivalent, so
/// translation rejects it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Vec<Value>,
}

impl Expr {
    pub fn in_list(expr: impl Into<Self>, list: impl IntoIterator<Item = Value>) -> Self {
        Self::InList(ExprInList {
            expr: Box::new(expr.into()),
            list: list.into_iter().collect(),
        })
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}
