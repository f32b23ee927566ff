use super::IntoExpr;
use std::marker::PhantomData;
use std::ops::Not;
use trellis_core::stmt;

/// A predicate or operand over a model's properties.
///
/// `Expr<bool>` is what [`Query::filter`](super::Query::filter) and the
/// clause builders accept; `T` keeps operands of a comparison the same type.
#[derive(Debug)]
pub struct Expr<T: ?Sized> {
    pub(crate) untyped: stmt::Expr,
    pub(crate) _p: PhantomData<T>,
}

impl<T: ?Sized> Expr<T> {
    pub(crate) fn from_value(value: stmt::Value) -> Self {
        Self {
            untyped: stmt::Expr::Value(value),
            _p: PhantomData,
        }
    }

    pub fn from_untyped(untyped: impl Into<stmt::Expr>) -> Self {
        Self {
            untyped: untyped.into(),
            _p: PhantomData,
        }
    }

    pub fn into_untyped(self) -> stmt::Expr {
        self.untyped
    }
}

impl Expr<bool> {
    /// Joins with AND. A predicate cannot also contain [`or`](Expr::or).
    pub fn and(self, rhs: impl IntoExpr<bool>) -> Self {
        Self::from_untyped(stmt::Expr::and(self.untyped, rhs.into_expr().untyped))
    }

    pub fn or(self, rhs: impl IntoExpr<bool>) -> Self {
        Self::from_untyped(stmt::Expr::or(self.untyped, rhs.into_expr().untyped))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        !self
    }
}

impl Not for Expr<bool> {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_untyped(stmt::Expr::not(self.untyped))
    }
}

impl<T: ?Sized> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self {
            untyped: self.untyped.clone(),
            _p: PhantomData,
        }
    }
}
